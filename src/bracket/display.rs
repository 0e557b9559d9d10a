use serde::Serialize;

use super::types::Bracket;
use crate::domain::PlayerRegistry;

/// What a renderer needs for one bracket slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayCell {
    pub name: Option<String>,
    pub score: Option<u32>,
}

pub type DisplayMatrix = Vec<Vec<DisplayCell>>;

/// Per round, per slot: player label and score. Empty slots yield `(None, None)`.
pub fn to_display_matrix(bracket: &Bracket, registry: &PlayerRegistry) -> DisplayMatrix {
    bracket
        .rounds()
        .iter()
        .map(|round| {
            round
                .iter()
                .map(|slot| match slot {
                    Some(slot) => DisplayCell {
                        name: Some(
                            registry
                                .get(&slot.player_id)
                                .map(|record| record.label().to_string())
                                .unwrap_or_else(|| slot.player_id.clone()),
                        ),
                        score: slot.score,
                    },
                    None => DisplayCell {
                        name: None,
                        score: None,
                    },
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::{Slot, SlotPos};

    #[test]
    fn test_matrix_uses_display_names() {
        let mut registry = PlayerRegistry::new();
        registry.set_display_name("U1", "Ana");

        let mut bracket = Bracket::empty(2);
        bracket.place(SlotPos::new(0, 0), Slot::new("U1"));
        bracket.place(
            SlotPos::new(0, 1),
            Slot {
                player_id: "U2".to_string(),
                score: Some(3),
            },
        );

        let matrix = to_display_matrix(&bracket, &registry);

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0][0].name.as_deref(), Some("Ana"));
        assert_eq!(matrix[0][1].name.as_deref(), Some("U2"));
        assert_eq!(matrix[0][1].score, Some(3));
        assert_eq!(matrix[1][0], DisplayCell { name: None, score: None });
    }
}
