use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{DateField, Documents};
use crate::{action::Action, mode::Mode, table::dates::parse_query_date};

impl Documents {
  pub(super) fn handle_events(&mut self, event: Option<crate::tui::Event>) -> Result<Option<Action>> {
    if let Some(crate::tui::Event::Key(key)) = event {
      self.handle_key_events(key)
    } else {
      Ok(None)
    }
  }

  pub(super) fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    // Popups swallow Esc before anything else
    if key.code == KeyCode::Esc {
      if self.error_message.is_some() {
        self.error_message = None;
        return Ok(Some(Action::Render));
      }
      if self.show_help {
        self.show_help = false;
        return Ok(Some(Action::Render));
      }
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
      return Ok(None);
    }

    match self.mode {
      Mode::Home => Ok(None),
      Mode::Search => Ok(self.handle_search_key(key)),
      Mode::Filter => Ok(self.handle_filter_key(key)),
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
    let column = self.focused_column()?;
    match key.code {
      // Edits only queue the query. The table catches up on the next tick or on Enter, so
      // an edit undone before then never moves the page.
      KeyCode::Char(c) => {
        self.search_input.push(c);
        self.table.set_search_query(column, self.search_input.clone());
        self.search_pending = true;
        None
      },
      KeyCode::Backspace => {
        self.search_input.pop();
        self.table.set_search_query(column, self.search_input.clone());
        self.search_pending = true;
        None
      },
      KeyCode::Enter => {
        self.refresh();
        self.mode = Mode::Home;
        Some(Action::SwitchMode(Mode::Home))
      },
      KeyCode::Esc => {
        self.search_input.clear();
        self.table.clear_search_query(&column);
        self.refresh();
        self.mode = Mode::Home;
        Some(Action::SwitchMode(Mode::Home))
      },
      _ => None,
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Action> {
    if let Some((field, mut buffer)) = self.date_input.take() {
      match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '/' => {
          buffer.push(c);
          self.date_input = Some((field, buffer));
        },
        KeyCode::Backspace => {
          buffer.pop();
          self.date_input = Some((field, buffer));
        },
        KeyCode::Enter => self.apply_date(field, &buffer),
        KeyCode::Esc => {},
        _ => self.date_input = Some((field, buffer)),
      }
      return Some(Action::Render);
    }

    let mut criteria = self.table.filter_criteria().cloned().unwrap_or_default();
    match key.code {
      KeyCode::Char('a') => criteria.status_mut().approved ^= true,
      KeyCode::Char('r') => criteria.status_mut().rejected ^= true,
      KeyCode::Char('p') => criteria.status_mut().pending ^= true,
      KeyCode::Char('1') => criteria.file_types_mut().png ^= true,
      KeyCode::Char('2') => criteria.file_types_mut().jpg ^= true,
      KeyCode::Char('3') => criteria.file_types_mut().pdf ^= true,
      KeyCode::Char('4') => criteria.file_types_mut().doc ^= true,
      KeyCode::Char('f') => {
        self.date_input = Some((DateField::From, String::new()));
        return Some(Action::Render);
      },
      KeyCode::Char('t') => {
        self.date_input = Some((DateField::To, String::new()));
        return Some(Action::Render);
      },
      KeyCode::Char('c') => return Some(Action::ClearFilters),
      KeyCode::Esc | KeyCode::Enter => {
        self.mode = Mode::Home;
        return Some(Action::SwitchMode(Mode::Home));
      },
      _ => return None,
    }
    self.table.set_filter_criteria(Some(criteria));
    self.refresh();
    Some(Action::Render)
  }

  /// An empty entry clears the bound.
  fn apply_date(&mut self, field: DateField, text: &str) {
    let date = if text.trim().is_empty() {
      None
    } else {
      match parse_query_date(text) {
        Some(date) => Some(date),
        None => {
          self.error_message = Some(format!("Invalid date '{text}', expected MM-DD-YYYY or MM/DD/YYYY"));
          return;
        },
      }
    };

    let mut criteria = self.table.filter_criteria().cloned().unwrap_or_default();
    let range = criteria.date_range_mut();
    match field {
      DateField::From => range.from_date = date,
      DateField::To => range.to_date = date,
    }
    self.table.set_filter_criteria(Some(criteria));
    self.refresh();
  }
}
