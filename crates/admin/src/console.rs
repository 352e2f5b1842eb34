//! Line-oriented front end for the inventory screen.
//!
//! Each input line is one UI event. Rows are addressed by their position in the
//! current view (`edit 2`) or by full item id.

use core::str::FromStr;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use thiserror::Error;

use fitstock_core::InventoryItemId;
use fitstock_inventory::{
    ALL_CATEGORIES, Confirm, Field, ParseFieldError, RemoveOutcome, Sort, SortDirection, SortKey,
};

use crate::notify::NotificationQueue;
use crate::render::{render_filters, render_modal, render_notification, render_table};
use crate::screen::InventoryScreen;

pub const HELP: &str = "\
Commands:
  list                      show the table
  search <text>             filter by name, SKU or supplier (empty clears)
  category <name|all>       filter by category
  sort <name|sku|stock|price> [asc|desc], sort none
  add                       open the add form
  edit <row|id>             open the edit form
  set <field> <value>       fill a form field (name, sku, category, stock,
                            reorderPoint, unitPrice, supplier, expiryDate)
  save | cancel             submit or discard the form
  delete <row|id>           delete after confirmation
  help | quit
";

/// A row in the current view or an explicit id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Row(usize),
    Id(InventoryItemId),
}

impl FromStr for Target {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(row) = s.parse::<usize>() {
            if row > 0 {
                return Ok(Target::Row(row));
            }
        }
        s.parse::<InventoryItemId>()
            .map(Target::Id)
            .map_err(|_| CommandError::Target(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Category(String),
    Sort(Option<Sort>),
    Add,
    Edit(Target),
    Set(Field, String),
    Save,
    Cancel,
    Delete(Target),
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error(transparent)]
    Field(#[from] ParseFieldError),

    #[error("`{0}` is neither a row number nor an item id")]
    Target(String),

    #[error("unknown sort `{0}` (name, sku, stock, price, none)")]
    Sort(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "" | "list" | "ls" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "category" | "cat" => {
                if rest.is_empty() {
                    Command::Category(ALL_CATEGORIES.to_string())
                } else {
                    Command::Category(rest.to_string())
                }
            }
            "sort" => Command::Sort(parse_sort(rest)?),
            "add" | "new" => Command::Add,
            "edit" => Command::Edit(target(rest, "edit")?),
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        what: "a field name",
                    });
                }
                Command::Set(field.parse()?, value.to_string())
            }
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(target(rest, "delete")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn target(rest: &str, command: &'static str) -> Result<Target, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            what: "a row number or item id",
        });
    }
    rest.parse()
}

fn parse_sort(rest: &str) -> Result<Option<Sort>, CommandError> {
    let (key, direction) = split_word(rest);
    let key = match key.to_ascii_lowercase().as_str() {
        "" | "none" | "off" => return Ok(None),
        "name" => SortKey::Name,
        "sku" => SortKey::Sku,
        "stock" => SortKey::Stock,
        "price" | "unitprice" => SortKey::UnitPrice,
        _ => return Err(CommandError::Sort(rest.to_string())),
    };
    let direction = match direction.to_ascii_lowercase().as_str() {
        "" | "asc" => SortDirection::Asc,
        "desc" => SortDirection::Desc,
        _ => return Err(CommandError::Sort(rest.to_string())),
    };
    Ok(Some(Sort { key, direction }))
}

/// Asks on the console's own input/output.
struct PromptConfirm<'a, R, W> {
    input: RefCell<&'a mut R>,
    output: RefCell<&'a mut W>,
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<'_, R, W> {
    fn confirm(&self, prompt: &str) -> bool {
        let mut output = self.output.borrow_mut();
        if write!(output, "{prompt} [y/N] ")
            .and_then(|_| output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

pub struct Console<R, W> {
    screen: InventoryScreen<NotificationQueue>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(screen: InventoryScreen<NotificationQueue>, input: R, output: W) -> Self {
        Self {
            screen,
            input,
            output,
        }
    }

    pub fn screen(&self) -> &InventoryScreen<NotificationQueue> {
        &self.screen
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Render, then process lines until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.flush_notifications()?;
        self.screen.take_changed();
        self.render_view()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        let mut show_table = false;

        match command {
            Command::List => show_table = true,
            Command::Search(query) => {
                self.screen.set_query(query);
                show_table = true;
            }
            Command::Category(selector) => {
                self.screen.set_category(&selector);
                show_table = true;
            }
            Command::Sort(sort) => {
                self.screen.set_sort(sort);
                show_table = true;
            }
            Command::Add => {
                if !self.screen.open_add() {
                    writeln!(self.output, "Close the open form first (save or cancel).")?;
                }
            }
            Command::Edit(target) => match self.resolve(target) {
                Some(id) => {
                    if self.screen.modal().is_open() {
                        writeln!(self.output, "Close the open form first (save or cancel).")?;
                    } else {
                        self.screen.open_edit(id);
                    }
                }
                None => writeln!(self.output, "No such row in the current view.")?,
            },
            Command::Set(field, value) => {
                if !self.screen.set_field(field, value) {
                    writeln!(self.output, "No form is open (use add or edit).")?;
                }
            }
            Command::Save => {
                self.screen.submit();
            }
            Command::Cancel => {
                self.screen.cancel();
                show_table = true;
            }
            Command::Delete(target) => match self.resolve(target) {
                Some(_) if self.screen.modal().is_open() => {
                    writeln!(self.output, "Close the open form first (save or cancel).")?;
                }
                Some(id) => {
                    let gate = PromptConfirm {
                        input: RefCell::new(&mut self.input),
                        output: RefCell::new(&mut self.output),
                    };
                    if self.screen.delete(id, &gate) == Some(RemoveOutcome::Cancelled) {
                        writeln!(self.output, "Delete cancelled.")?;
                    }
                }
                None => writeln!(self.output, "No such row in the current view.")?,
            },
            Command::Help => write!(self.output, "{HELP}")?,
            Command::Quit => {}
        }

        self.flush_notifications()?;
        let changed = self.screen.take_changed();
        match render_modal(self.screen.modal(), self.screen.store().schema()) {
            Some(modal) => write!(self.output, "{modal}")?,
            None if changed || show_table => self.render_view()?,
            None => {}
        }
        Ok(())
    }

    fn resolve(&self, target: Target) -> Option<InventoryItemId> {
        match target {
            Target::Row(n) => self
                .screen
                .rows()
                .get(n.checked_sub(1)?)
                .map(|row| row.item.id_typed()),
            Target::Id(id) => Some(id),
        }
    }

    fn render_view(&mut self) -> io::Result<()> {
        let filters = render_filters(self.screen.filter(), &self.screen.category_options());
        let table = render_table(&self.screen.rows(), self.screen.load_state());
        write!(self.output, "{filters}{table}")
    }

    fn flush_notifications(&mut self) -> io::Result<()> {
        for notification in self.screen.notifier_mut().drain() {
            write!(self.output, "{}", render_notification(&notification))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filters() {
        assert_eq!("".parse::<Command>().unwrap(), Command::List);
        assert_eq!(
            "search  whey protein ".parse::<Command>().unwrap(),
            Command::Search("whey protein".to_string())
        );
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(String::new()));
        assert_eq!(
            "category".parse::<Command>().unwrap(),
            Command::Category("all".to_string())
        );
        assert_eq!(
            "sort price desc".parse::<Command>().unwrap(),
            Command::Sort(Some(Sort::desc(SortKey::UnitPrice)))
        );
        assert_eq!("sort none".parse::<Command>().unwrap(), Command::Sort(None));
    }

    #[test]
    fn parses_form_commands() {
        assert_eq!(
            "set reorderPoint 20".parse::<Command>().unwrap(),
            Command::Set(Field::ReorderPoint, "20".to_string())
        );
        assert_eq!(
            "set name Lifting Straps".parse::<Command>().unwrap(),
            Command::Set(Field::Name, "Lifting Straps".to_string())
        );
        assert_eq!(
            "set supplier".parse::<Command>().unwrap(),
            Command::Set(Field::Supplier, String::new())
        );
        assert_eq!("edit 2".parse::<Command>().unwrap(), Command::Edit(Target::Row(2)));
    }

    #[test]
    fn targets_accept_ids() {
        let id = InventoryItemId::new();
        assert_eq!(
            format!("delete {id}").parse::<Command>().unwrap(),
            Command::Delete(Target::Id(id))
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            "frobnicate".parse::<Command>().unwrap_err(),
            CommandError::Unknown("frobnicate".to_string())
        );
        assert!(matches!(
            "edit".parse::<Command>().unwrap_err(),
            CommandError::MissingArgument { command: "edit", .. }
        ));
        assert!(matches!(
            "set colour red".parse::<Command>().unwrap_err(),
            CommandError::Field(_)
        ));
        assert!(matches!(
            "delete 0".parse::<Command>().unwrap_err(),
            CommandError::Target(_)
        ));
        assert!(matches!(
            "sort weight".parse::<Command>().unwrap_err(),
            CommandError::Sort(_)
        ));
    }

    #[test]
    fn resolves_rows_by_one_based_index() {
        let store = fitstock_inventory::InventoryStore::from_items(
            std::sync::Arc::new(fitstock_core::SystemClock),
            fitstock_inventory::seed_items(),
        )
        .unwrap();
        let screen = InventoryScreen::new(store, NotificationQueue::new());
        let console = Console::new(screen, io::empty(), Vec::new());
        let first = console.screen().store().items()[0].id_typed();

        assert_eq!(console.resolve(Target::Row(1)), Some(first));
        assert_eq!(console.resolve(Target::Row(0)), None);
        assert_eq!(console.resolve(Target::Row(3)), None);
    }
}
