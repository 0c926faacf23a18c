//! Session state for the upload → submit → result flow
//!
//! A [`Session`] is an immutable snapshot. Every transition borrows the
//! current snapshot and returns a new one, so a rejected transition leaves the
//! caller's state untouched.

use crate::encoder::ImageFile;
use crate::models::GeneratedImage;
use crate::{Error, Result};
use std::sync::Arc;
use uuid::Uuid;

/// A chosen file and the handle its preview is rendered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file: ImageFile,
    pub preview_id: Uuid,
}

impl SelectedImage {
    fn new(file: ImageFile) -> Self {
        Self {
            file,
            preview_id: Uuid::new_v4(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    HasSelection,
    Submitting,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Empty => "empty",
            Phase::HasSelection => "has_selection",
            Phase::Submitting => "submitting",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Session {
    Empty {
        prompt: String,
    },
    HasSelection {
        images: Vec<SelectedImage>,
        prompt: String,
    },
    Submitting {
        images: Vec<SelectedImage>,
        prompt: String,
    },
    Succeeded {
        images: Vec<SelectedImage>,
        prompt: String,
        result: GeneratedImage,
    },
    Failed {
        images: Vec<SelectedImage>,
        prompt: String,
        error: Arc<Error>,
    },
}

/// Failed snapshots compare equal when they carry the same error instance.
impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Session::Empty { prompt: a }, Session::Empty { prompt: b }) => a == b,
            (
                Session::HasSelection {
                    images: ia,
                    prompt: pa,
                },
                Session::HasSelection {
                    images: ib,
                    prompt: pb,
                },
            )
            | (
                Session::Submitting {
                    images: ia,
                    prompt: pa,
                },
                Session::Submitting {
                    images: ib,
                    prompt: pb,
                },
            ) => ia == ib && pa == pb,
            (
                Session::Succeeded {
                    images: ia,
                    prompt: pa,
                    result: ra,
                },
                Session::Succeeded {
                    images: ib,
                    prompt: pb,
                    result: rb,
                },
            ) => ia == ib && pa == pb && ra == rb,
            (
                Session::Failed {
                    images: ia,
                    prompt: pa,
                    error: ea,
                },
                Session::Failed {
                    images: ib,
                    prompt: pb,
                    error: eb,
                },
            ) => ia == ib && pa == pb && Arc::ptr_eq(ea, eb),
            _ => false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session::Empty {
            prompt: String::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Session::Empty { .. } => Phase::Empty,
            Session::HasSelection { .. } => Phase::HasSelection,
            Session::Submitting { .. } => Phase::Submitting,
            Session::Succeeded { .. } => Phase::Succeeded,
            Session::Failed { .. } => Phase::Failed,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Session::Empty { prompt }
            | Session::HasSelection { prompt, .. }
            | Session::Submitting { prompt, .. }
            | Session::Succeeded { prompt, .. }
            | Session::Failed { prompt, .. } => prompt,
        }
    }

    pub fn images(&self) -> &[SelectedImage] {
        match self {
            Session::Empty { .. } => &[],
            Session::HasSelection { images, .. }
            | Session::Submitting { images, .. }
            | Session::Succeeded { images, .. }
            | Session::Failed { images, .. } => images,
        }
    }

    /// Files in selection order.
    pub fn files(&self) -> Vec<ImageFile> {
        self.images().iter().map(|i| i.file.clone()).collect()
    }

    pub fn preview_ids(&self) -> Vec<Uuid> {
        self.images().iter().map(|i| i.preview_id).collect()
    }

    pub fn result(&self) -> Option<&GeneratedImage> {
        match self {
            Session::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Session::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    fn invalid(&self, action: &str) -> Error {
        Error::InvalidTransition(format!(
            "cannot {} while {}",
            action,
            self.phase().as_str()
        ))
    }

    /// Appends files to the selection.
    pub fn select(&self, files: Vec<ImageFile>) -> Result<Session> {
        let (mut images, prompt) = match self {
            Session::Empty { prompt } => (Vec::new(), prompt.clone()),
            Session::HasSelection { images, prompt } => (images.clone(), prompt.clone()),
            _ => return Err(self.invalid("select images")),
        };

        images.extend(files.into_iter().map(SelectedImage::new));
        Ok(Self::editing(images, prompt))
    }

    pub fn remove(&self, index: usize) -> Result<Session> {
        let Session::HasSelection { images, prompt } = self else {
            return Err(self.invalid("remove an image"));
        };
        if index >= images.len() {
            return Err(Error::InvalidTransition(format!(
                "no selected image at position {} (have {})",
                index,
                images.len()
            )));
        }

        let mut images = images.clone();
        images.remove(index);
        Ok(Self::editing(images, prompt.clone()))
    }

    pub fn with_prompt(&self, prompt: impl Into<String>) -> Result<Session> {
        let prompt = prompt.into();
        match self {
            Session::Empty { .. } => Ok(Session::Empty { prompt }),
            Session::HasSelection { images, .. } => Ok(Session::HasSelection {
                images: images.clone(),
                prompt,
            }),
            _ => Err(self.invalid("edit the prompt")),
        }
    }

    /// Requires at least one image and a non-blank prompt.
    pub fn submit(&self) -> Result<Session> {
        let Session::HasSelection { images, prompt } = self else {
            return Err(match self {
                Session::Empty { .. } => {
                    Error::InvalidRequest("select at least one image first".to_string())
                }
                _ => self.invalid("submit"),
            });
        };
        if prompt.trim().is_empty() {
            return Err(Error::InvalidRequest(
                "describe the scene before submitting".to_string(),
            ));
        }

        Ok(Session::Submitting {
            images: images.clone(),
            prompt: prompt.clone(),
        })
    }

    pub fn succeed(&self, result: GeneratedImage) -> Result<Session> {
        let Session::Submitting { images, prompt } = self else {
            return Err(self.invalid("record a result"));
        };
        Ok(Session::Succeeded {
            images: images.clone(),
            prompt: prompt.clone(),
            result,
        })
    }

    pub fn fail(&self, error: Error) -> Result<Session> {
        let Session::Submitting { images, prompt } = self else {
            return Err(self.invalid("record a failure"));
        };
        Ok(Session::Failed {
            images: images.clone(),
            prompt: prompt.clone(),
            error: Arc::new(error),
        })
    }

    /// Clears files, previews, prompt and result.
    pub fn reset(&self) -> Result<Session> {
        match self {
            Session::Submitting { .. } => Err(self.invalid("reset")),
            _ => Ok(Session::new()),
        }
    }

    fn editing(images: Vec<SelectedImage>, prompt: String) -> Session {
        if images.is_empty() {
            Session::Empty { prompt }
        } else {
            Session::HasSelection { images, prompt }
        }
    }
}
