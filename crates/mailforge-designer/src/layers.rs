//! Layers panel.
//!
//! The panel lists elements topmost first, the reverse of the underlying
//! sequence. Moving a row therefore has to translate displayed positions
//! back to sequence positions before the new order is handed to
//! [`Canvas::reorder`].

use mailforge_core::{DesignError, ElementId};

use crate::canvas::Canvas;
use crate::model::{Element, ElementKind};

const LABEL_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerRow {
    pub id: ElementId,
    pub label: String,
    /// Element type caption shown under the label.
    pub caption: String,
    pub hidden: bool,
    pub locked: bool,
    pub selected: bool,
}

/// Row label for an element.
pub fn layer_label(element: &Element) -> String {
    match &element.kind {
        ElementKind::Text(text) if text.content.is_empty() => "Text".to_string(),
        ElementKind::Text(text) => text.content.chars().take(LABEL_MAX_CHARS).collect(),
        ElementKind::MergeTag(tag) => tag.tag.clone(),
        ElementKind::Image(_) => "Image".to_string(),
        ElementKind::Rectangle(_) | ElementKind::Circle(_) => {
            element.element_type().display_name().to_string()
        }
    }
}

/// Rows topmost first.
pub fn rows(canvas: &Canvas) -> Vec<LayerRow> {
    let selected = canvas.selected_id();
    canvas
        .elements()
        .iter()
        .rev()
        .map(|e| LayerRow {
            id: e.id,
            label: layer_label(e),
            caption: e.element_type().display_name().to_string(),
            hidden: e.hidden,
            locked: e.locked,
            selected: selected == Some(e.id),
        })
        .collect()
}

/// Sequence index of the row shown at `display` in a list of `len` rows.
pub fn display_to_sequence_index(display: usize, len: usize) -> Option<usize> {
    (display < len).then(|| len - 1 - display)
}

/// New sequence order after dragging the row at displayed position `from`
/// to displayed position `to`.
pub fn reordered_sequence(
    current: &[ElementId],
    from: usize,
    to: usize,
) -> Result<Vec<ElementId>, DesignError> {
    let len = current.len();
    for index in [from, to] {
        if index >= len {
            return Err(DesignError::LayerIndexOutOfRange { index, len });
        }
    }

    let mut displayed: Vec<ElementId> = current.iter().rev().copied().collect();
    let moved = displayed.remove(from);
    displayed.insert(to, moved);
    displayed.reverse();
    Ok(displayed)
}

/// Moves a layer row and applies the resulting order to the canvas.
pub fn move_row(canvas: &mut Canvas, from: usize, to: usize) -> Result<bool, DesignError> {
    if from == to && from < canvas.element_count() {
        return Ok(false);
    }
    let order = reordered_sequence(&canvas.element_store.ids(), from, to)?;
    canvas.reorder(&order)?;
    tracing::debug!("Moved layer row {} to {}", from, to);
    Ok(true)
}

/// Selects the element behind a clicked row.
pub fn select_row(canvas: &mut Canvas, id: ElementId) -> Option<ElementId> {
    canvas.select(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementType;
    use crate::patch::ElementPatch;

    fn ids(n: u64) -> Vec<ElementId> {
        (1..=n).map(ElementId).collect()
    }

    /// Same move expressed directly on the sequence: the row at displayed
    /// `from` sits at `n-1-from`; after removing it, displayed `to` maps to
    /// sequence slot `n-1-to`.
    fn move_in_sequence(current: &[ElementId], from: usize, to: usize) -> Vec<ElementId> {
        let n = current.len();
        let mut seq = current.to_vec();
        let moved = seq.remove(n - 1 - from);
        seq.insert(n - 1 - to, moved);
        seq
    }

    #[test]
    fn test_display_index_translation() {
        assert_eq!(display_to_sequence_index(0, 3), Some(2));
        assert_eq!(display_to_sequence_index(2, 3), Some(0));
        assert_eq!(display_to_sequence_index(3, 3), None);
    }

    #[test]
    fn test_move_top_row_to_bottom() {
        let [a, b, c] = [ElementId(1), ElementId(2), ElementId(3)];
        // displayed [C, B, A]; C dragged to the bottom shows [B, A, C]
        assert_eq!(reordered_sequence(&[a, b, c], 0, 2).unwrap(), vec![c, a, b]);
    }

    #[test]
    fn test_known_moves_on_four() {
        let [a, b, c, d] = [ElementId(1), ElementId(2), ElementId(3), ElementId(4)];
        let current = [a, b, c, d];
        // displayed [d, c, b, a]
        let cases = [
            (0, 3, vec![d, a, b, c]),
            (3, 0, vec![b, c, d, a]),
            (1, 2, vec![a, c, b, d]),
            (0, 1, vec![a, b, d, c]),
            (2, 2, vec![a, b, c, d]),
        ];
        for (from, to, expected) in cases {
            assert_eq!(
                reordered_sequence(&current, from, to).unwrap(),
                expected,
                "from {from} to {to}"
            );
        }
    }

    #[test]
    fn test_every_pairwise_move_on_four() {
        let current = ids(4);
        for from in 0..4 {
            for to in 0..4 {
                let got = reordered_sequence(&current, from, to).unwrap();
                assert_eq!(
                    got,
                    move_in_sequence(&current, from, to),
                    "from {from} to {to}"
                );

                let mut sorted = got.clone();
                sorted.sort();
                assert_eq!(sorted, current);

                // displayed position `to` now shows the moved element
                let displayed: Vec<_> = got.iter().rev().copied().collect();
                assert_eq!(displayed[to], current[3 - from]);
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            reordered_sequence(&ids(2), 0, 2),
            Err(DesignError::LayerIndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_rows_and_move_on_canvas() {
        let mut canvas = Canvas::new();
        let text = canvas.add_element(ElementType::Text);
        canvas.update_element(
            text,
            &ElementPatch {
                content: Some("Your Neighborhood Expert".to_string()),
                ..Default::default()
            },
        );
        let rect = canvas.add_element(ElementType::Rectangle);
        let image = canvas.add_element(ElementType::Image);
        canvas.toggle_visibility(rect);

        let list = rows(&canvas);
        assert_eq!(
            list.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![image, rect, text]
        );
        assert_eq!(list[2].label, "Your Neighborhood Ex");
        assert_eq!(list[1].label, "Rectangle");
        assert!(list[1].hidden);
        assert!(list[0].selected);
        assert_eq!(list[0].label, "Image");

        assert!(move_row(&mut canvas, 0, 2).unwrap());
        assert_eq!(canvas.element_ids(), vec![image, text, rect]);
        assert!(!move_row(&mut canvas, 1, 1).unwrap());
        assert_eq!(canvas.selected_id(), Some(image));
    }

    #[test]
    fn test_text_label_keeps_leading_whitespace() {
        let mut canvas = Canvas::new();
        let id = canvas.add_element(ElementType::Text);
        let label = |canvas: &Canvas| layer_label(canvas.get_element(id).unwrap());

        let set = |canvas: &mut Canvas, content: &str| {
            canvas.update_element(
                id,
                &ElementPatch {
                    content: Some(content.to_string()),
                    ..Default::default()
                },
            );
        };

        set(&mut canvas, "   Open House Sunday at Noon");
        assert_eq!(label(&canvas), "   Open House Sunday");
        set(&mut canvas, "");
        assert_eq!(label(&canvas), "Text");
    }
}
