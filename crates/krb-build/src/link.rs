use krb_format::ElementRecord;
use krb_model::{ElementId, RenderContext};

use crate::error::Result;

/// Rebuilds parent/child structure from the flat element table's
/// `child_count` fields (spec §4.6).
///
/// The flat table stores each element immediately followed by its
/// `child_count` children's own subtrees, depth-first — so a stack of
/// "how many siblings remain at this depth" is enough to reconstruct the
/// tree in one linear pass with no backtracking. When `has_app` is set,
/// element `0` is the sole root (spec §4.2); otherwise every element with
/// no pending parent on the stack becomes a root, supporting documents
/// that describe multiple independent top-level elements.
///
/// `ids` supplies the arena id already assigned to each record (by
/// [`crate::instantiate::instantiate_records`]); it is a parallel array to
/// `records`, not assumed to equal the record's position, since template
/// expansions append their elements onto the arena's tail rather than
/// starting at index `0`.
pub fn link_tree(
    ctx: &mut RenderContext,
    records: &[ElementRecord],
    ids: &[ElementId],
    has_app: bool,
) -> Result<Vec<ElementId>> {
    debug_assert_eq!(records.len(), ids.len());
    let mut roots = Vec::new();
    // Each stack frame is (parent id, children still expected).
    let mut stack: Vec<(ElementId, u32)> = Vec::new();

    for (record, &id) in records.iter().zip(ids.iter()) {
        match stack.last_mut() {
            Some((parent, remaining)) if *remaining > 0 => {
                let parent = *parent;
                ctx.attach(parent, id)?;
                *remaining -= 1;
            }
            _ => {
                roots.push(id);
            }
        }

        while let Some((_, remaining)) = stack.last() {
            if *remaining == 0 {
                stack.pop();
            } else {
                break;
            }
        }

        if record.header.child_count > 0 {
            stack.push((id, u32::from(record.header.child_count)));
        }
    }

    if has_app {
        roots.truncate(1);
    }

    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use krb_format::{
        Alignment, ElementHeader, ElementKind, LayoutDirection, PositionMode,
    };
    use krb_model::RenderElement;

    fn record_with_children(kind: ElementKind, child_count: u8) -> ElementRecord {
        ElementRecord {
            header: ElementHeader {
                kind,
                id_index: 0,
                pos_x: 0,
                pos_y: 0,
                width: 0,
                height: 0,
                layout_direction: LayoutDirection::Row,
                alignment: Alignment::Start,
                grow: false,
                position_mode: PositionMode::Flow,
                style_id: 0,
                property_count: 0,
                custom_property_count: 0,
                state_property_set_count: 0,
                event_count: 0,
                animation_count: 0,
                child_count,
            },
            properties: Vec::new(),
            custom_properties: Vec::new(),
            events: Vec::new(),
            state_property_sets: Vec::new(),
        }
    }

    #[test]
    fn links_a_flat_parent_with_two_children() {
        let records = vec![
            record_with_children(ElementKind::App, 2),
            record_with_children(ElementKind::Container, 0),
            record_with_children(ElementKind::Text, 0),
        ];
        let mut ctx = RenderContext::default();
        let ids: Vec<ElementId> = records
            .iter()
            .enumerate()
            .map(|(i, r)| ctx.push(RenderElement::new(r.header.kind.into(), i as u32)))
            .collect();

        let roots = link_tree(&mut ctx, &records, &ids, true).unwrap();
        assert_eq!(roots, vec![ElementId::new(0)]);
        assert_eq!(
            ctx.get(ElementId::new(0)).unwrap().children,
            vec![ElementId::new(1), ElementId::new(2)]
        );
    }

    #[test]
    fn links_nested_subtrees() {
        // App(2 children: Container(1 child: Text), Text)
        let records = vec![
            record_with_children(ElementKind::App, 2),
            record_with_children(ElementKind::Container, 1),
            record_with_children(ElementKind::Text, 0),
            record_with_children(ElementKind::Text, 0),
        ];
        let mut ctx = RenderContext::default();
        let ids: Vec<ElementId> = records
            .iter()
            .enumerate()
            .map(|(i, r)| ctx.push(RenderElement::new(r.header.kind.into(), i as u32)))
            .collect();

        link_tree(&mut ctx, &records, &ids, true).unwrap();
        assert_eq!(
            ctx.get(ElementId::new(1)).unwrap().children,
            vec![ElementId::new(2)]
        );
        assert_eq!(
            ctx.get(ElementId::new(0)).unwrap().children,
            vec![ElementId::new(1), ElementId::new(3)]
        );
    }
}
