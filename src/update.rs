use crate::messages::{Command, Message};
use crate::routes::Route;
use crate::state::{AppState, TaskDetailState};

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    // ---------------------------------------------------------------
    // Delegate to domain-specific reducers first.  When one of them
    // consumes the message we can bail out early.
    // ---------------------------------------------------------------

    if crate::reducers::tasks::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::task_detail::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::playground::update(state, &msg, &mut commands) {
        return commands;
    }

    match msg {
        Message::Navigate(route) => navigate(state, route, &mut commands),
        other => log::warn!("unhandled message: {:?}", other),
    }

    commands
}

fn navigate(state: &mut AppState, route: Route, commands: &mut Vec<Command>) {
    let previous = std::mem::replace(&mut state.route, route.clone());
    log::debug!("navigate {:?} -> {:?}", previous, route);

    if previous.root_segment() != route.root_segment() {
        state.breadcrumbs.clear();
    }

    if previous == Route::Playground && route != Route::Playground {
        crate::reducers::playground::reset_session(&mut state.playground);
    }

    match &route {
        Route::Tasks => {
            state.tasks.loading = true;
            state.tasks.error = None;
            commands.push(Command::FetchTasks);
        }
        Route::TaskDetail(task_id) => {
            let same_task = state.task_detail.as_ref().is_some_and(|d| &d.task_id == task_id);
            if same_task {
                if let Some(detail) = state.task_detail.as_mut() {
                    detail.loading_task = true;
                    detail.loading_documents = true;
                }
            } else {
                state.task_detail = Some(TaskDetailState::new(task_id.clone()));
            }
            commands.push(Command::FetchTask(task_id.clone()));
            commands.push(Command::FetchDocuments(task_id.clone()));
            commands.push(Command::FetchBaseModels);
        }
        Route::Playground => {
            if previous != Route::Playground {
                state.playground.loading = true;
                commands.push(Command::FetchPlaygroundTasks);
            }
        }
        Route::Home | Route::NotFound(_) => {}
    }

    if !matches!(route, Route::TaskDetail(_)) {
        state.task_detail = None;
    }
}
