//! Task detail reducer: loading the task, its documents and the base
//! models, and the upload / fine-tune / deploy actions.
//!
//! Results tagged with a task id other than the one on screen are dropped.

use crate::breadcrumb::BreadcrumbContext;
use crate::error::ApiError;
use crate::messages::{Command, Message};
use crate::state::{AppState, TaskDetailState};
use crate::toast::ToastKind;

fn detail_for<'a>(state: &'a mut AppState, task_id: &str) -> Option<&'a mut TaskDetailState> {
    state.task_detail.as_mut().filter(|d| d.task_id == task_id)
}

fn reload(detail: &mut TaskDetailState, commands: &mut Vec<Command>) {
    detail.loading_task = true;
    detail.loading_documents = true;
    commands.push(Command::FetchTask(detail.task_id.clone()));
    commands.push(Command::FetchDocuments(detail.task_id.clone()));
}

fn report(commands: &mut Vec<Command>, what: &str, error: &ApiError) {
    match error.status() {
        Some(status) => log::error!("{} (HTTP {}): {}", what, status, error),
        None => log::error!("{}: {}", what, error),
    }
    commands.push(Command::error_toast(format!("{}: {}", what, error)));
}

/// Handles task-detail messages. Returns true if the message was handled.
pub fn update(state: &mut AppState, msg: &Message, commands: &mut Vec<Command>) -> bool {
    match msg {
        Message::TaskLoaded { task_id, task } => {
            let current = state.task_detail.as_mut().filter(|d| &d.task_id == task_id);
            if let Some(detail) = current {
                detail.selected_base_model = task.base_model().unwrap_or_default().to_string();
                detail.task = Some(task.clone());
                detail.loading_task = false;
                state
                    .breadcrumbs
                    .set_info([(BreadcrumbContext::task_key(task_id), task.name.clone())]);
            }
        }
        Message::TaskLoadFailed { task_id, error } => {
            if let Some(detail) = detail_for(state, task_id) {
                detail.loading_task = false;
                report(commands, "Failed to load task", error);
            }
        }
        Message::DocumentsLoaded { task_id, documents } => {
            if let Some(detail) = detail_for(state, task_id) {
                detail.documents = documents.clone();
                detail.loading_documents = false;
            }
        }
        Message::DocumentsLoadFailed { task_id, error } => {
            if let Some(detail) = detail_for(state, task_id) {
                detail.loading_documents = false;
                report(commands, "Failed to load documents", error);
            }
        }
        Message::BaseModelsLoaded(models) => {
            if let Some(detail) = state.task_detail.as_mut() {
                detail.base_models = models.clone();
            }
        }
        Message::BaseModelsLoadFailed(error) => {
            // Only the fine-tune form needs these; keep the page usable.
            log::error!("failed to load base models: {}", error);
        }
        Message::RefreshTaskDetail => {
            if let Some(detail) = state.task_detail.as_mut() {
                reload(detail, commands);
            }
        }
        Message::SampleFileSelected(name) => {
            if let Some(detail) = state.task_detail.as_mut() {
                detail.selected_file_name = name.clone();
            }
        }
        Message::UploadSample => {
            let Some(detail) = state.task_detail.as_mut() else {
                return true;
            };
            if detail.uploading {
                return true;
            }
            if detail.selected_file_name.is_none() {
                commands.push(Command::toast(ToastKind::Info, "Choose a .pdf or .zip file first."));
                return true;
            }
            detail.uploading = true;
            commands.push(Command::UploadSample {
                task_id: detail.task_id.clone(),
            });
        }
        Message::UploadFinished { task_id, result } => {
            if let Some(detail) = detail_for(state, task_id) {
                detail.uploading = false;
                match result {
                    Ok(()) => {
                        detail.selected_file_name = None;
                        commands.push(Command::toast(ToastKind::Success, "Sample uploaded."));
                        commands.push(Command::UpdateUI(Box::new(crate::pages::task_detail::clear_sample_input)));
                        reload(detail, commands);
                    }
                    Err(error) => report(commands, "Upload failed", error),
                }
            }
        }
        Message::SelectBaseModel(model) => {
            if let Some(detail) = state.task_detail.as_mut() {
                detail.selected_base_model = model.clone();
            }
        }
        Message::StartFineTune => {
            let Some(detail) = state.task_detail.as_mut() else {
                return true;
            };
            let allowed = detail.task.as_ref().is_some_and(|t| t.can_start_fine_tune());
            if !allowed || detail.fine_tuning {
                return true;
            }
            if detail.selected_base_model.is_empty() {
                commands.push(Command::toast(ToastKind::Info, "Select a base model first."));
                return true;
            }
            detail.fine_tuning = true;
            commands.push(Command::StartFineTune {
                task_id: detail.task_id.clone(),
                base_model: detail.selected_base_model.clone(),
            });
        }
        Message::FineTuneFinished { task_id, result } => {
            if let Some(detail) = detail_for(state, task_id) {
                detail.fine_tuning = false;
                match result {
                    Ok(()) => {
                        commands.push(Command::toast(ToastKind::Success, "Fine-tune started."));
                        reload(detail, commands);
                    }
                    Err(error) => report(commands, "Fine-tune failed", error),
                }
            }
        }
        Message::Deploy => {
            let Some(detail) = state.task_detail.as_mut() else {
                return true;
            };
            let allowed = detail.task.as_ref().is_some_and(|t| t.can_deploy());
            if !allowed || detail.deploying {
                return true;
            }
            detail.deploying = true;
            commands.push(Command::Deploy {
                task_id: detail.task_id.clone(),
            });
        }
        Message::DeployFinished { task_id, result } => {
            if let Some(detail) = detail_for(state, task_id) {
                detail.deploying = false;
                match result {
                    Ok(()) => {
                        commands.push(Command::toast(ToastKind::Success, "Deployment started."));
                        reload(detail, commands);
                    }
                    Err(error) => report(commands, "Deployment failed", error),
                }
            }
        }
        _ => return false,
    }
    true
}
