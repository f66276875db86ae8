//! View/edit toggle shared by the event, note and profile detail screens.

use std::future::Future;

use crate::error::AjandaResult;

/// Holds the record being viewed and, while editing, a draft of it.
///
/// `V` is what the backend returned, `D` is the form built from it. Saving
/// only replaces `V` once the backend accepts the draft; a failed save
/// leaves the draft in place so nothing typed is lost.
#[derive(Debug, Clone)]
pub struct Detail<V, D> {
    current: V,
    draft: Option<D>,
}

impl<V, D> Detail<V, D>
where
    D: for<'a> From<&'a V>,
{
    pub fn new(current: V) -> Self {
        Detail {
            current,
            draft: None,
        }
    }

    pub fn current(&self) -> &V {
        &self.current
    }

    /// Swap in a refreshed copy without touching the draft.
    pub fn replace(&mut self, current: V) {
        self.current = current;
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Enter edit mode. An edit already in progress is kept.
    pub fn begin_edit(&mut self) -> &mut D {
        let current = &self.current;
        self.draft.get_or_insert_with(|| D::from(current))
    }

    pub fn draft(&self) -> Option<&D> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        self.draft.as_mut()
    }

    /// Drop the draft and go back to viewing.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Hand the draft to `submit`. On success the returned record becomes
    /// current and the screen leaves edit mode.
    ///
    /// Saving while not editing is a no-op.
    pub async fn save<F, Fut>(&mut self, submit: F) -> AjandaResult<&V>
    where
        D: Clone,
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = AjandaResult<V>>,
    {
        let Some(draft) = self.draft.clone() else {
            return Ok(&self.current);
        };

        match submit(draft).await {
            Ok(saved) => {
                self.current = saved;
                self.draft = None;
                Ok(&self.current)
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed, keeping draft");
                Err(e)
            }
        }
    }
}
