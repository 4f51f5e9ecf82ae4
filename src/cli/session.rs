//! Line-oriented session: the presentation layer over `SelectionController`
//!
//! Each input line is one command. Results come back as [`Reply`] values and
//! active view changes are collected from a controller subscription, so the
//! caller decides how to render both.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::application::{ActiveView, MergeOutcome, SelectionController};
use crate::cli::error::{CliError, CliResult};
use crate::domain::{ListRegistry, Rating, Restaurant, RestaurantList};

pub const HELP: &str = "\
lists                    show all lists (* marks the selection)
show                     show the selected list
select <n|none>          select list n, or clear the selection
new <name>               create a list and select it
add <name> [| <rating>]  add a restaurant to the selected list
merge [<n>]              merge list n into the selected list (no n: cancel)
help                     this text
quit                     leave the session";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Lists,
    Show,
    Select(Option<usize>),
    New(String),
    Add { name: String, rating: Option<String> },
    Merge(Option<usize>),
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> CliResult<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.trim()),
            None => (line, ""),
        };

        let cmd = match keyword {
            "lists" | "ls" => Self::Lists,
            "show" => Self::Show,
            "select" => match rest {
                "none" => Self::Select(None),
                _ => Self::Select(Some(parse_index(keyword, rest)?)),
            },
            "new" => Self::New(rest.to_string()),
            "add" => match rest.split_once('|') {
                Some((name, rating)) => Self::Add {
                    name: name.trim().to_string(),
                    rating: Some(rating.trim().to_string()),
                },
                None => Self::Add {
                    name: rest.to_string(),
                    rating: None,
                },
            },
            "merge" => match rest {
                "" => Self::Merge(None),
                _ => Self::Merge(Some(parse_index(keyword, rest)?)),
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => {
                return Err(CliError::Usage(format!(
                    "unknown command '{other}' (try 'help')"
                )))
            }
        };
        Ok(Some(cmd))
    }
}

fn parse_index(keyword: &str, arg: &str) -> CliResult<usize> {
    arg.parse()
        .map_err(|_| CliError::Usage(format!("{keyword}: expected a list index, got '{arg}'")))
}

/// One row of the `lists` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub index: usize,
    pub name: String,
    pub len: usize,
    pub selected: bool,
}

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lists(Vec<ListSummary>),
    View(ActiveView),
    Selected(Option<String>),
    Created { index: usize, name: String },
    Added(Restaurant),
    Duplicate(Restaurant),
    Merged(MergeOutcome),
    MergeCancelled,
    Help,
    Quit,
}

/// Interactive state: a controller plus the view updates it published.
pub struct Session {
    controller: SelectionController,
    updates: Rc<RefCell<Vec<ActiveView>>>,
}

impl Session {
    pub fn new(registry: ListRegistry) -> Self {
        let mut controller = SelectionController::new(registry);
        let updates = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&updates);
        controller.subscribe(move |view: &ActiveView| sink.borrow_mut().push(view.clone()));
        // the initial delivery only primes the subscription
        updates.borrow_mut().clear();
        Self {
            controller,
            updates,
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Drain active view updates published since the last call.
    pub fn take_updates(&mut self) -> Vec<ActiveView> {
        self.updates.borrow_mut().drain(..).collect()
    }

    /// Parse and execute one line.
    pub fn execute_line(&mut self, line: &str) -> CliResult<Option<Reply>> {
        match SessionCommand::parse(line)? {
            Some(cmd) => self.execute(cmd).map(Some),
            None => Ok(None),
        }
    }

    pub fn execute(&mut self, cmd: SessionCommand) -> CliResult<Reply> {
        debug!("execute: {:?}", cmd);
        let reply = match cmd {
            SessionCommand::Lists => Reply::Lists(self.summaries()),
            SessionCommand::Show => Reply::View(self.controller.active_view().clone()),
            SessionCommand::Select(index) => {
                self.controller.select(index)?;
                Reply::Selected(
                    self.controller
                        .registry()
                        .selected_list()
                        .map(|l| l.name().to_string()),
                )
            }
            SessionCommand::New(name) => {
                let list = RestaurantList::new(name)?;
                let name = list.name().to_string();
                let index = self.controller.add_list(list);
                self.controller.select(Some(index))?;
                Reply::Created { index, name }
            }
            SessionCommand::Add { name, rating } => {
                let rating = rating.map(|r| r.parse::<Rating>()).transpose()?;
                let restaurant = Restaurant::new(name, rating)?;
                if self.controller.add_restaurant(restaurant.clone())? {
                    Reply::Added(restaurant)
                } else {
                    Reply::Duplicate(restaurant)
                }
            }
            SessionCommand::Merge(source) => match self.controller.merge_into_selected(source)? {
                Some(outcome) => Reply::Merged(outcome),
                None => Reply::MergeCancelled,
            },
            SessionCommand::Help => Reply::Help,
            SessionCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }

    fn summaries(&self) -> Vec<ListSummary> {
        let registry = self.controller.registry();
        registry
            .lists()
            .iter()
            .enumerate()
            .map(|(index, list)| ListSummary {
                index,
                name: list.name().to_string(),
                len: list.len(),
                selected: registry.selected_index() == Some(index),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("lists", SessionCommand::Lists)]
    #[case("  show  ", SessionCommand::Show)]
    #[case("select none", SessionCommand::Select(None))]
    #[case("select 2", SessionCommand::Select(Some(2)))]
    #[case("new Lunch spots", SessionCommand::New("Lunch spots".into()))]
    #[case("merge", SessionCommand::Merge(None))]
    #[case("merge 1", SessionCommand::Merge(Some(1)))]
    #[case(
        "add Green Dragon | 4.5",
        SessionCommand::Add { name: "Green Dragon".into(), rating: Some("4.5".into()) }
    )]
    #[case(
        "add Cactus",
        SessionCommand::Add { name: "Cactus".into(), rating: None }
    )]
    fn given_valid_line_when_parsing_then_returns_command(
        #[case] line: &str,
        #[case] expected: SessionCommand,
    ) {
        assert_eq!(SessionCommand::parse(line).unwrap(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("# a comment")]
    fn given_blank_or_comment_when_parsing_then_none(#[case] line: &str) {
        assert_eq!(SessionCommand::parse(line).unwrap(), None);
    }

    #[rstest]
    #[case("select two")]
    #[case("remove 0")]
    #[case("rm 0")]
    #[case("frobnicate")]
    fn given_bad_line_when_parsing_then_usage_error(#[case] line: &str) {
        assert!(matches!(
            SessionCommand::parse(line),
            Err(CliError::Usage(_))
        ));
    }
}
