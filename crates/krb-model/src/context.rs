use crate::component::ComponentInstance;
use crate::element::RenderElement;
use crate::error::{ModelError, Result};
use crate::id::ElementId;

/// Owning arena for a document's render tree.
///
/// Elements are appended and never removed individually: a placeholder
/// that a component instance replaces stays in the arena (marked
/// `is_placeholder`) rather than being deallocated, so every `ElementId`
/// handed out stays valid for the arena's whole lifetime. This mirrors
/// the index-based tree storage the wider example corpus uses in place
/// of `Rc<RefCell<_>>` graphs.
#[derive(Debug, Default)]
pub struct RenderContext {
    elements: Vec<RenderElement>,
    component_instances: Vec<ComponentInstance>,
    roots: Vec<ElementId>,
}

impl RenderContext {
    #[must_use]
    pub fn with_capacity(elements: usize, components: usize) -> Self {
        Self {
            elements: Vec::with_capacity(elements),
            component_instances: Vec::with_capacity(components),
            roots: Vec::new(),
        }
    }

    pub fn push(&mut self, element: RenderElement) -> ElementId {
        let id = ElementId::new(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&RenderElement> {
        self.elements.get(id.index())
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut RenderElement> {
        self.elements.get_mut(id.index())
    }

    pub fn try_get(&self, id: ElementId) -> Result<&RenderElement> {
        self.get(id).ok_or(ModelError::NotFound(id))
    }

    pub fn try_get_mut(&mut self, id: ElementId) -> Result<&mut RenderElement> {
        self.get_mut(id).ok_or(ModelError::NotFound(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Links `child` under `parent`, appending to the parent's child
    /// list. Does not validate against cycles: the tree linker builds
    /// this arena bottom-up from a flat, already-validated element table
    /// and structurally cannot introduce one.
    pub fn attach(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.try_get_mut(child)?.parent = Some(parent);
        self.try_get_mut(parent)?.children.push(child);
        Ok(())
    }

    pub fn set_roots(&mut self, roots: Vec<ElementId>) {
        self.roots = roots;
    }

    #[must_use]
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn push_component_instance(&mut self, instance: ComponentInstance) {
        self.component_instances.push(instance);
    }

    #[must_use]
    pub fn component_instances(&self) -> &[ComponentInstance] {
        &self.component_instances
    }

    /// Depth-first pre-order iterator over the subtree rooted at `id`,
    /// visiting `id` itself first. Used by layout and hit testing alike.
    pub fn descendants(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let mut stack = vec![id];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            if let Some(element) = self.get(next) {
                stack.extend(element.children.iter().rev());
            }
            Some(next)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn attach_links_parent_and_child() {
        let mut ctx = RenderContext::default();
        let parent = ctx.push(RenderElement::new(ElementKind::Container, 0));
        let child = ctx.push(RenderElement::new(ElementKind::Text, 1));
        ctx.attach(parent, child).unwrap();

        assert_eq!(ctx.get(child).unwrap().parent, Some(parent));
        assert_eq!(ctx.get(parent).unwrap().children, vec![child]);
    }

    #[test]
    fn descendants_visits_preorder() {
        let mut ctx = RenderContext::default();
        let root = ctx.push(RenderElement::new(ElementKind::Container, 0));
        let a = ctx.push(RenderElement::new(ElementKind::Container, 1));
        let b = ctx.push(RenderElement::new(ElementKind::Text, 2));
        ctx.attach(root, a).unwrap();
        ctx.attach(root, b).unwrap();

        let order: Vec<_> = ctx.descendants(root).collect();
        assert_eq!(order, vec![root, a, b]);
    }

    #[test]
    fn try_get_reports_missing_element() {
        let ctx = RenderContext::default();
        let err = ctx.try_get(ElementId::new(5)).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }
}
