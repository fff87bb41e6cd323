//! Form and item-menu state machine.
//!
//! The controller is a pure reducer over an explicit state value. The UI
//! layer translates key events into `Action`s; `apply` returns the next
//! state plus the store mutation (if any) that the transition implies.
//! Keeping this free of any UI types makes the add/edit/delete flows
//! testable on their own.

use crate::models::{next_item_id, MenuItem};
use crate::utils::format_price;

/// Which dialog field currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Category,
    Price,
    Details,
    Image,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Name,
        DraftField::Category,
        DraftField::Price,
        DraftField::Details,
        DraftField::Image,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Category => "Category",
            DraftField::Price => "Price",
            DraftField::Details => "Details",
            DraftField::Image => "Image URL",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            DraftField::Name => DraftField::Category,
            DraftField::Category => DraftField::Price,
            DraftField::Price => DraftField::Details,
            DraftField::Details => DraftField::Image,
            DraftField::Image => DraftField::Name,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            DraftField::Name => DraftField::Image,
            DraftField::Category => DraftField::Name,
            DraftField::Price => DraftField::Category,
            DraftField::Details => DraftField::Price,
            DraftField::Image => DraftField::Details,
        }
    }
}

/// Pending form contents.
///
/// Everything is raw text while the user types; the price is coerced to a
/// number at commit time, never at display time. All fields are optional
/// and unvalidated - an empty name or price commits silently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: String,
    pub details: String,
    pub image: String,
}

impl ItemDraft {
    pub fn blank() -> Self {
        Self {
            id: next_item_id(),
            ..Default::default()
        }
    }

    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            price: format_price(item.price),
            details: item.details.clone(),
            image: item.image.clone(),
        }
    }

    /// Commit the draft as a menu item. The price is coerced here, at the
    /// point of commit: unparseable input becomes 0.
    pub fn commit(&self) -> MenuItem {
        MenuItem {
            id: self.id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            price: self.price.trim().parse().unwrap_or(0.0),
            details: self.details.trim().to_string(),
            image: self.image.trim().to_string(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Category => &self.category,
            DraftField::Price => &self.price,
            DraftField::Details => &self.details,
            DraftField::Image => &self.image,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Category => &mut self.category,
            DraftField::Price => &mut self.price,
            DraftField::Details => &mut self.details,
            DraftField::Image => &mut self.image,
        }
    }
}

/// The highlighted entry in the per-item action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Edit,
    Delete,
}

impl MenuChoice {
    pub fn toggled(&self) -> Self {
        match self {
            MenuChoice::Edit => MenuChoice::Delete,
            MenuChoice::Delete => MenuChoice::Edit,
        }
    }
}

/// Controller states: no dialog open, a per-item action menu open, or one
/// of the two modal forms open.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerState {
    Idle,
    ItemMenuOpen { id: i64, choice: MenuChoice },
    AddDialogOpen { draft: ItemDraft, field: DraftField },
    EditDialogOpen { draft: ItemDraft, field: DraftField },
}

/// User actions the controller understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    OpenItemMenu { id: i64 },
    MoveChoice,
    ChooseEdit,
    ChooseDelete,
    OpenAddDialog,
    NextField,
    PrevField,
    Input(char),
    Backspace,
    Confirm,
    Cancel,
}

/// Store mutation implied by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Append(MenuItem),
    Update { id: i64, item: MenuItem },
    Remove { id: i64 },
}

/// Run one action through the state machine.
///
/// `items` is the current list, needed to pre-populate the edit form. The
/// reducer never mutates the store itself; it hands back an `Effect` for
/// the caller to apply.
pub fn apply(state: ControllerState, action: Action, items: &[MenuItem]) -> (ControllerState, Effect) {
    match state {
        ControllerState::Idle => match action {
            Action::OpenItemMenu { id } => (
                ControllerState::ItemMenuOpen {
                    id,
                    choice: MenuChoice::Edit,
                },
                Effect::None,
            ),
            Action::OpenAddDialog => (
                ControllerState::AddDialogOpen {
                    draft: ItemDraft::blank(),
                    field: DraftField::Name,
                },
                Effect::None,
            ),
            _ => (ControllerState::Idle, Effect::None),
        },

        ControllerState::ItemMenuOpen { id, choice } => match action {
            Action::MoveChoice => (
                ControllerState::ItemMenuOpen {
                    id,
                    choice: choice.toggled(),
                },
                Effect::None,
            ),
            Action::ChooseEdit => open_edit(id, items),
            Action::ChooseDelete => (ControllerState::Idle, Effect::Remove { id }),
            Action::Confirm => match choice {
                MenuChoice::Edit => open_edit(id, items),
                MenuChoice::Delete => (ControllerState::Idle, Effect::Remove { id }),
            },
            Action::Cancel => (ControllerState::Idle, Effect::None),
            _ => (ControllerState::ItemMenuOpen { id, choice }, Effect::None),
        },

        ControllerState::AddDialogOpen { draft, field } => step_dialog(action, draft, field, true),
        ControllerState::EditDialogOpen { draft, field } => step_dialog(action, draft, field, false),
    }
}

/// Shared dialog transitions for the add and edit forms. The only
/// difference is what Confirm does: adds mint a new id, edits keep the
/// draft's id so the store can replace in place.
fn step_dialog(
    action: Action,
    mut draft: ItemDraft,
    field: DraftField,
    adding: bool,
) -> (ControllerState, Effect) {
    let rebuild = |draft: ItemDraft, field: DraftField| {
        if adding {
            ControllerState::AddDialogOpen { draft, field }
        } else {
            ControllerState::EditDialogOpen { draft, field }
        }
    };

    match action {
        Action::Input(c) => {
            draft.field_mut(field).push(c);
            (rebuild(draft, field), Effect::None)
        }
        Action::Backspace => {
            draft.field_mut(field).pop();
            (rebuild(draft, field), Effect::None)
        }
        Action::NextField => (rebuild(draft, field.next()), Effect::None),
        Action::PrevField => (rebuild(draft, field.prev()), Effect::None),
        Action::Confirm => {
            if adding {
                let mut item = draft.commit();
                item.id = next_item_id();
                (ControllerState::Idle, Effect::Append(item))
            } else {
                let item = draft.commit();
                (
                    ControllerState::Idle,
                    Effect::Update { id: item.id, item },
                )
            }
        }
        Action::Cancel => (ControllerState::Idle, Effect::None),
        _ => (rebuild(draft, field), Effect::None),
    }
}

fn open_edit(id: i64, items: &[MenuItem]) -> (ControllerState, Effect) {
    match items.iter().find(|i| i.id == id) {
        Some(item) => (
            ControllerState::EditDialogOpen {
                draft: ItemDraft::from_item(item),
                field: DraftField::Name,
            },
            Effect::None,
        ),
        // Item vanished between menu open and edit; nothing to edit
        None => (ControllerState::Idle, Effect::None),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, price: f64) -> MenuItem {
        MenuItem {
            id,
            name: name.to_string(),
            category: "Sides".to_string(),
            price,
            details: String::new(),
            image: String::new(),
        }
    }

    fn type_text(mut state: ControllerState, text: &str) -> ControllerState {
        for c in text.chars() {
            let (next, effect) = apply(state, Action::Input(c), &[]);
            assert_eq!(effect, Effect::None);
            state = next;
        }
        state
    }

    #[test]
    fn test_add_flow_commits_with_coerced_price() {
        let (state, _) = apply(ControllerState::Idle, Action::OpenAddDialog, &[]);
        let state = type_text(state, "Fries");
        let (state, _) = apply(state, Action::NextField, &[]);
        let state = type_text(state, "Sides");
        let (state, _) = apply(state, Action::NextField, &[]);
        let state = type_text(state, "80");

        let (state, effect) = apply(state, Action::Confirm, &[]);
        assert_eq!(state, ControllerState::Idle);
        match effect {
            Effect::Append(item) => {
                assert_eq!(item.name, "Fries");
                assert_eq!(item.category, "Sides");
                assert_eq!(item.price, 80.0);
                assert!(item.id > 0);
            }
            other => panic!("expected Append, got {:?}", other),
        }
    }

    #[test]
    fn test_add_confirm_mints_fresh_id() {
        let (state, _) = apply(ControllerState::Idle, Action::OpenAddDialog, &[]);
        let draft_id = match &state {
            ControllerState::AddDialogOpen { draft, .. } => draft.id,
            other => panic!("expected AddDialogOpen, got {:?}", other),
        };
        let (_, effect) = apply(state, Action::Confirm, &[]);
        match effect {
            Effect::Append(item) => assert!(item.id > draft_id),
            other => panic!("expected Append, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_price_coerces_to_zero() {
        let (state, _) = apply(ControllerState::Idle, Action::OpenAddDialog, &[]);
        let (state, _) = apply(state, Action::NextField, &[]);
        let (state, _) = apply(state, Action::NextField, &[]);
        let state = type_text(state, "cheap");

        let (_, effect) = apply(state, Action::Confirm, &[]);
        match effect {
            Effect::Append(item) => assert_eq!(item.price, 0.0),
            other => panic!("expected Append, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_discards_draft() {
        let (state, _) = apply(ControllerState::Idle, Action::OpenAddDialog, &[]);
        let state = type_text(state, "Fries");
        let (state, effect) = apply(state, Action::Cancel, &[]);
        assert_eq!(state, ControllerState::Idle);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_edit_flow_prepopulates_and_updates() {
        let items = vec![item(7, "Burger", 150.0)];
        let (state, _) = apply(ControllerState::Idle, Action::OpenItemMenu { id: 7 }, &items);
        let (state, _) = apply(state, Action::ChooseEdit, &items);

        match &state {
            ControllerState::EditDialogOpen { draft, field } => {
                assert_eq!(draft.name, "Burger");
                assert_eq!(draft.price, "150");
                assert_eq!(*field, DraftField::Name);
            }
            other => panic!("expected EditDialogOpen, got {:?}", other),
        }

        let state = type_text(state, " Deluxe");
        let (state, effect) = apply(state, Action::Confirm, &items);
        assert_eq!(state, ControllerState::Idle);
        match effect {
            Effect::Update { id, item } => {
                assert_eq!(id, 7);
                assert_eq!(item.name, "Burger Deluxe");
                assert_eq!(item.price, 150.0);
            }
            other => panic!("expected Update, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_of_vanished_item_returns_to_idle() {
        let state = ControllerState::ItemMenuOpen {
            id: 99,
            choice: MenuChoice::Edit,
        };
        let (state, effect) = apply(state, Action::ChooseEdit, &[]);
        assert_eq!(state, ControllerState::Idle);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_delete_from_item_menu() {
        let items = vec![item(7, "Burger", 150.0)];
        let (state, _) = apply(ControllerState::Idle, Action::OpenItemMenu { id: 7 }, &items);
        let (state, effect) = apply(state, Action::ChooseDelete, &items);
        assert_eq!(state, ControllerState::Idle);
        assert_eq!(effect, Effect::Remove { id: 7 });
    }

    #[test]
    fn test_item_menu_choice_and_confirm() {
        let items = vec![item(7, "Burger", 150.0)];
        let (state, _) = apply(ControllerState::Idle, Action::OpenItemMenu { id: 7 }, &items);
        let (state, _) = apply(state, Action::MoveChoice, &items);
        match &state {
            ControllerState::ItemMenuOpen { choice, .. } => assert_eq!(*choice, MenuChoice::Delete),
            other => panic!("expected ItemMenuOpen, got {:?}", other),
        }
        let (_, effect) = apply(state, Action::Confirm, &items);
        assert_eq!(effect, Effect::Remove { id: 7 });
    }

    #[test]
    fn test_backspace_edits_focused_field() {
        let (state, _) = apply(ControllerState::Idle, Action::OpenAddDialog, &[]);
        let state = type_text(state, "ab");
        let (state, _) = apply(state, Action::Backspace, &[]);
        match &state {
            ControllerState::AddDialogOpen { draft, .. } => assert_eq!(draft.name, "a"),
            other => panic!("expected AddDialogOpen, got {:?}", other),
        }
    }

    #[test]
    fn test_field_focus_cycles() {
        let mut field = DraftField::Name;
        for _ in 0..DraftField::ALL.len() {
            field = field.next();
        }
        assert_eq!(field, DraftField::Name);
        assert_eq!(DraftField::Name.prev(), DraftField::Image);
    }
}
