use std::sync::Arc;

use crate::api::journal::{CreateJournalRequest, JournalResponse, UpdateJournalRequest};
use crate::database::models::{Id, NewJournal};
use crate::database::repository::JournalStore;

use super::ownership::authorized;
use super::ServiceResult;

pub struct JournalService {
    journals: Arc<dyn JournalStore>,
}

impl JournalService {
    pub fn new(journals: Arc<dyn JournalStore>) -> Self {
        Self { journals }
    }

    pub async fn create(&self, owner: Id, req: CreateJournalRequest) -> ServiceResult<JournalResponse> {
        let journal = self
            .journals
            .create(NewJournal {
                user_id: owner,
                mood: req.mood,
                content: req.content,
                visibility: req.visibility,
            })
            .await?;
        Ok(journal.into())
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<JournalResponse>> {
        let journals = self.journals.find_all().await?;
        Ok(journals.into_iter().map(JournalResponse::from).collect())
    }

    pub async fn find_by_id(&self, id: Id) -> ServiceResult<JournalResponse> {
        Ok(self.journals.find_by_id(id).await?.into())
    }

    pub async fn update(&self, id: Id, caller: Id, req: UpdateJournalRequest) -> ServiceResult<JournalResponse> {
        let mut journal = authorized(caller, "journal", self.journals.find_by_id(id)).await?;

        if let Some(mood) = req.mood {
            journal.mood = mood;
        }
        if let Some(content) = req.content {
            journal.content = content;
        }
        if let Some(visibility) = req.visibility {
            journal.visibility = visibility;
        }

        Ok(self.journals.update(&journal).await?.into())
    }

    pub async fn delete(&self, id: Id, caller: Id) -> ServiceResult<()> {
        authorized(caller, "journal", self.journals.find_by_id(id)).await?;
        self.journals.delete(id).await?;
        Ok(())
    }
}
