use inquire::{InquireError, Select, Text};
use weather_view_core::{Event, Phase, Screen, Session};

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    ToggleSearch,
    Type,
    Pick { index: usize, label: String },
    OpenDay { index: usize, label: String },
    CloseDetail,
    DismissError,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::ToggleSearch => f.write_str("Toggle search"),
            Action::Type => f.write_str("Type a city"),
            Action::Pick { label, .. } => write!(f, "Pick {label}"),
            Action::OpenDay { label, .. } => write!(f, "Open {label}"),
            Action::CloseDetail => f.write_str("Close detail"),
            Action::DismissError => f.write_str("Dismiss error"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

fn actions(session: &Session) -> Vec<Action> {
    let screen = session.screen();
    let mut actions = Vec::new();

    match &session.state().phase {
        Phase::DetailOpen { .. } => actions.push(Action::CloseDetail),
        Phase::Error { .. } => {
            actions.push(Action::DismissError);
            actions.push(Action::ToggleSearch);
        }
        phase if phase.is_search_open() => {
            actions.push(Action::Type);
            actions.extend(
                screen
                    .search
                    .iter()
                    .flat_map(|s| s.candidates.iter().cloned().enumerate())
                    .map(|(index, label)| Action::Pick { index, label }),
            );
            actions.push(Action::ToggleSearch);
        }
        Phase::Displaying => {
            actions.push(Action::ToggleSearch);
            actions.extend(screen.forecast.iter().map(|tile| Action::OpenDay {
                index: tile.index,
                label: format!(
                    "{} {}",
                    tile.day.unwrap_or("?"),
                    tile.max_temp.as_deref().unwrap_or("")
                ),
            }));
        }
        _ => actions.push(Action::ToggleSearch),
    }

    actions.push(Action::Quit);
    actions
}

/// Dispatches `event` and waits for the work it started.
///
/// Returns the screen as it looked while that work was outstanding, such as the loading
/// indicator during a fetch.
async fn apply(session: &mut Session, event: Event) -> Option<Screen> {
    session.dispatch(event);
    if !session.is_busy() {
        return None;
    }

    let interim = session.screen();
    session.settle().await;
    Some(interim)
}

pub async fn run(mut session: Session) -> anyhow::Result<()> {
    loop {
        println!("\n{}", render::render(&session.screen()));

        let choice = match Select::new("What next?", actions(&session)).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        let event = match choice {
            Action::ToggleSearch => Event::ToggleSearch,
            Action::Type => {
                let placeholder = session.locale().search_placeholder();
                match Text::new("City:").with_placeholder(placeholder).prompt() {
                    Ok(query) => Event::QueryChanged(query),
                    Err(InquireError::OperationCanceled) => continue,
                    Err(err) => return Err(err.into()),
                }
            }
            Action::Pick { index, .. } => Event::PickCandidate(index),
            Action::OpenDay { index, .. } => Event::OpenDay(index),
            Action::CloseDetail => Event::DismissModal,
            Action::DismissError => Event::DismissError,
            Action::Quit => break,
        };

        tracing::debug!(?event, "interactive event");
        if let Some(interim) = apply(&mut session, event).await {
            println!("\n{}", render::render(&interim));
        }
    }

    session.shutdown();
    Ok(())
}
