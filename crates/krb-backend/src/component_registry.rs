use std::collections::HashMap;

use krb_model::{ComponentInstance, RenderContext};

/// Maps a component definition's name to a post-instantiation hook (spec
/// §4.1's Custom Component Registry, §4.9). A hook may read custom
/// property values from the placeholder, set `render_x/y/w/h` on the
/// instance root, and reposition sibling elements; it runs once, after
/// expansion and before the first layout.
#[derive(Default)]
pub struct CustomComponentRegistry {
    hooks: HashMap<String, Box<dyn FnMut(&mut RenderContext, ComponentInstance)>>,
}

impl std::fmt::Debug for CustomComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomComponentRegistry")
            .field("registered", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CustomComponentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        component_name: impl Into<String>,
        hook: impl FnMut(&mut RenderContext, ComponentInstance) + 'static,
    ) {
        self.hooks.insert(component_name.into(), Box::new(hook));
    }

    /// Runs the hook registered for `component_name`, if any. A
    /// component instance whose definition has no matching hook is left
    /// exactly as expansion produced it — this is the common case, not
    /// an error (spec §4.9 only names hooks for components that need
    /// post-instantiation behavior).
    pub fn invoke(
        &mut self,
        component_name: &str,
        ctx: &mut RenderContext,
        instance: ComponentInstance,
    ) {
        if let Some(hook) = self.hooks.get_mut(component_name) {
            hook(ctx, instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_model::{ElementId, ElementKind, RenderElement};

    #[test]
    fn hook_can_set_the_instance_roots_render_rect() {
        let mut ctx = RenderContext::default();
        let root = ctx.push(RenderElement::new(ElementKind::Container, 0));
        let instance = ComponentInstance {
            definition_index: 0,
            placeholder: ElementId::new(0),
            root,
        };

        let mut registry = CustomComponentRegistry::new();
        registry.register("tabbar", |ctx, instance| {
            if let Some(element) = ctx.get_mut(instance.root) {
                element.render_preset = true;
            }
        });

        registry.invoke("tabbar", &mut ctx, instance);
        assert!(ctx.get(root).unwrap().render_preset);
    }

    #[test]
    fn unregistered_component_name_is_a_no_op() {
        let mut ctx = RenderContext::default();
        let root = ctx.push(RenderElement::new(ElementKind::Container, 0));
        let instance = ComponentInstance {
            definition_index: 0,
            placeholder: ElementId::new(0),
            root,
        };

        let mut registry = CustomComponentRegistry::new();
        registry.invoke("unknown", &mut ctx, instance);
        assert!(!ctx.get(root).unwrap().render_preset);
    }
}
