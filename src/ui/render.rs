use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::controller::{ControllerState, DraftField, ItemDraft, MenuChoice};
use crate::models::MenuItem;
use crate::utils::{format_price, truncate};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Header row
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_header(frame, app, chunks[1]);
    render_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays from the controller state
    match &app.controller {
        ControllerState::ItemMenuOpen { choice, .. } => render_item_menu_overlay(frame, *choice),
        ControllerState::AddDialogOpen { draft, field } => {
            render_dialog(frame, "Add New Menu Item", draft, *field, "Add Item")
        }
        ControllerState::EditDialogOpen { draft, field } => {
            render_dialog(frame, "Edit Menu Item", draft, *field, "Save")
        }
        ControllerState::Idle => {}
    }

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = "  Alex's Kitchen";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.len() as u16 + help_hint.len() as u16 + 4)
                as usize,
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let left = format!(" Our Menu ({} items)", app.store.len());
    let hints = "[a] Add Item | [r] Restore Data from API ";

    let padding = (area.width as usize).saturating_sub(left.len() + hints.len());
    let line = Line::from(vec![
        Span::styled(left, styles::highlight_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(hints, styles::muted_style()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_item_list(frame, app, chunks[0]);
    render_item_detail(frame, app, chunks[1]);
}

fn render_item_list(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .store
        .items()
        .iter()
        .map(|item| {
            let price = format!("{} TK", format_price(item.price));
            let name_width = width.saturating_sub(price.len() + 1);
            let name = truncate(&item.name, name_width);
            let padding = width.saturating_sub(name.chars().count() + price.len());
            ListItem::new(Line::from(vec![
                Span::styled(name, styles::list_item_style()),
                Span::raw(" ".repeat(padding)),
                Span::styled(price, styles::muted_style()),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Menu ");

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_style())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.store.is_empty() {
        state.select(Some(app.selection));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false))
        .title(" Details ");

    let lines = match app.selected_item() {
        Some(item) => detail_lines(item),
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No menu items. Press [a] to add one or [r] to restore from the API.",
                styles::muted_style(),
            )),
        ],
    };

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn detail_lines(item: &MenuItem) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", item.name),
            styles::title_style(),
        )),
        Line::from(Span::styled(
            format!("  {}", item.category),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Price: {} TK", format_price(item.price)),
            styles::highlight_style(),
        )),
        Line::from(""),
    ];

    if !item.details.is_empty() {
        lines.push(Line::from(format!("  {}", item.details)));
        lines.push(Line::from(""));
    }

    if !item.image.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  Image: {}", item.image),
            styles::muted_style(),
        )));
    }

    lines
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let cache_age = app.cache_age.as_deref().unwrap_or("never");
    let left = format!(" Cache: {}", cache_age);
    let message = app.status_message.as_deref().unwrap_or("");

    let padding = (area.width as usize).saturating_sub(left.len() + message.len() + 1);
    let line = Line::from(vec![
        Span::raw(left),
        Span::raw(" ".repeat(padding)),
        Span::styled(message.to_string(), styles::highlight_style()),
        Span::raw(" "),
    ]);

    frame.render_widget(Paragraph::new(line).style(styles::status_bar_style()), area);
}

// ============================================================================
// Overlays
// ============================================================================

fn render_item_menu_overlay(frame: &mut Frame, choice: MenuChoice) {
    let area = centered_rect(24, 6, frame.area());
    frame.render_widget(Clear, area);

    let entry = |label: &str, selected: bool| {
        if selected {
            Line::from(Span::styled(format!(" > {}", label), styles::selected_style()))
        } else {
            Line::from(Span::styled(format!("   {}", label), styles::list_item_style()))
        }
    };

    let lines = vec![
        entry("Edit", choice == MenuChoice::Edit),
        entry("Delete", choice == MenuChoice::Delete),
        Line::from(""),
        Line::from(Span::styled(" [Enter] Choose  [Esc] Close", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Item ");

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_dialog(
    frame: &mut Frame,
    title: &str,
    draft: &ItemDraft,
    focused: DraftField,
    confirm_label: &str,
) {
    let area = centered_rect(50, (DraftField::ALL.len() as u16) * 2 + 4, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    for field in DraftField::ALL {
        let is_focused = field == focused;
        let label_style = if is_focused {
            styles::help_key_style()
        } else {
            styles::muted_style()
        };

        let mut value = draft.field(field).to_string();
        if is_focused {
            value.push('_');
        }

        lines.push(Line::from(Span::styled(
            format!(" {}:", field.label()),
            label_style,
        )));
        lines.push(Line::from(Span::styled(
            format!("   {}", value),
            styles::list_item_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" [Enter] {}  [Esc] Cancel  [Tab] Next field", confirm_label),
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(format!(" {} ", title));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(48, 14, frame.area());
    frame.render_widget(Clear, area);

    let key_line = |key: &str, desc: &str| {
        Line::from(vec![
            Span::styled(format!(" {:<12}", key), styles::help_key_style()),
            Span::styled(desc.to_string(), styles::help_desc_style()),
        ])
    };

    let lines = vec![
        Line::from(""),
        key_line("Up/Down", "Select menu item"),
        key_line("Enter", "Open item actions (Edit / Delete)"),
        key_line("a", "Add a new menu item"),
        key_line("r", "Restore Data from API (discards local edits)"),
        key_line("?", "Toggle this help"),
        key_line("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            " Edits are kept in a local cache for 24 hours.",
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" [Esc] Close", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(" Help ");

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Center a fixed-size rect within `r`, clamped to its bounds.
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
