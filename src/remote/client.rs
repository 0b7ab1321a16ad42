//! Cache-first client of the contact service.

use super::api::ContactApi;
use super::cache::{CachedResult, QueryCache, QueryKey, ResultSetKey};
use super::transport::Transport;
use crate::domain::error::{PhonebookError, Result};
use crate::domain::{Contact, ContactId, NewContact, SearchPattern};
use crate::worker::{WorkerMessage, WorkerResponse};
use futures_util::future::{FutureExt, LocalBoxFuture};

/// [`ContactApi`] implementation over a [`Transport`].
///
/// Reads are answered from the [`QueryCache`] when possible and stored there
/// after a successful round trip. Writes always go to the service and leave
/// the cache alone; evicting stale entries is the caller's job.
pub struct RemoteClient<T: Transport> {
    transport: T,
    cache: QueryCache,
}

impl<T: Transport> RemoteClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: QueryCache::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn request(&self, message: WorkerMessage) -> Result<WorkerResponse> {
        match self.transport.send(message).await? {
            WorkerResponse::Rejected { field, message } => Err(PhonebookError::Validation { field, message }),
            WorkerResponse::Error { message } => Err(PhonebookError::Transport(message)),
            response => Ok(response),
        }
    }

    /// Answers `key` from the cache, or sends `message` and caches the answer.
    ///
    /// A cache that cannot be read or written is bypassed, never fatal.
    async fn cached_read(&self, key: QueryKey, message: WorkerMessage) -> Result<CachedResult> {
        match self.cache.get(&key) {
            Ok(Some(hit)) => {
                tracing::trace!(?key, "cache hit");
                return Ok(hit);
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "cache lookup skipped"),
        }

        let result = match self.request(message).await? {
            WorkerResponse::FavoritesLoaded { contacts } | WorkerResponse::OthersLoaded { contacts } => {
                CachedResult::Contacts(contacts)
            }
            WorkerResponse::OthersCounted { count } => CachedResult::Count(count),
            other => return Err(unexpected(key.kind().to_string(), &other)),
        };

        if let Err(e) = self.cache.put(key, result.clone()) {
            tracing::debug!(error = %e, "cache store skipped");
        }
        Ok(result)
    }

    async fn read_contacts(&self, key: QueryKey, message: WorkerMessage) -> Result<Vec<Contact>> {
        match self.cached_read(key, message).await? {
            CachedResult::Contacts(contacts) => Ok(contacts),
            CachedResult::Count(_) => Err(PhonebookError::Cache("count cached under a list key".to_string())),
        }
    }
}

fn unexpected(operation: impl AsRef<str>, response: &WorkerResponse) -> PhonebookError {
    PhonebookError::Transport(format!(
        "unexpected response to {}: {response:?}",
        operation.as_ref()
    ))
}

impl<T: Transport> ContactApi for RemoteClient<T> {
    fn query_favorites(&self, ids: Vec<ContactId>) -> LocalBoxFuture<'_, Result<Vec<Contact>>> {
        async move {
            let key = QueryKey::favorites(&ids);
            self.read_contacts(key, WorkerMessage::query_favorites(ids)).await
        }
        .boxed_local()
    }

    fn query_others(
        &self,
        search: SearchPattern,
        exclude: Vec<ContactId>,
        offset: usize,
        limit: usize,
    ) -> LocalBoxFuture<'_, Result<Vec<Contact>>> {
        async move {
            let key = QueryKey::others(&search, &exclude, offset, limit);
            let message = WorkerMessage::query_others(search.into(), exclude, offset, limit);
            self.read_contacts(key, message).await
        }
        .boxed_local()
    }

    fn count_others(&self, search: SearchPattern, exclude: Vec<ContactId>) -> LocalBoxFuture<'_, Result<usize>> {
        async move {
            let key = QueryKey::count(&search, &exclude);
            let message = WorkerMessage::count_others(search.into(), exclude);
            match self.cached_read(key, message).await? {
                CachedResult::Count(count) => Ok(count),
                CachedResult::Contacts(_) => Err(PhonebookError::Cache("list cached under a count key".to_string())),
            }
        }
        .boxed_local()
    }

    fn create_contact(&self, contact: NewContact) -> LocalBoxFuture<'_, Result<Contact>> {
        async move {
            match self.request(WorkerMessage::create_contact(contact)).await? {
                WorkerResponse::ContactCreated { contact } => Ok(contact),
                other => Err(unexpected("create contact", &other)),
            }
        }
        .boxed_local()
    }

    fn update_contact(&self, id: ContactId, contact: NewContact) -> LocalBoxFuture<'_, Result<Contact>> {
        async move {
            match self.request(WorkerMessage::update_contact(id, contact)).await? {
                WorkerResponse::ContactUpdated { contact } => Ok(contact),
                other => Err(unexpected("update contact", &other)),
            }
        }
        .boxed_local()
    }

    fn delete_contact(&self, id: ContactId) -> LocalBoxFuture<'_, Result<ContactId>> {
        async move {
            match self.request(WorkerMessage::delete_contact(id)).await? {
                WorkerResponse::ContactDeleted { id } => Ok(id),
                other => Err(unexpected("delete contact", &other)),
            }
        }
        .boxed_local()
    }

    fn invalidate(&self, key: &ResultSetKey) -> Result<usize> {
        let dropped = self.cache.invalidate(key)?;
        tracing::debug!(result_set = %key, dropped, "result set invalidated");
        Ok(dropped)
    }

    fn evict_all(&self) -> Result<()> {
        self.cache.clear()?;
        tracing::debug!("result cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{LocalTransport, ResultSetKind};
    use crate::storage::MemoryStorage;
    use crate::worker::ContactWorker;

    fn client(names: &[&str]) -> RemoteClient<LocalTransport> {
        let storage = MemoryStorage::with_contacts(
            names
                .iter()
                .map(|n| NewContact::new(*n, "Doe", vec!["555-0100".to_string()])),
        )
        .unwrap();
        RemoteClient::new(LocalTransport::new(ContactWorker::new(Box::new(storage))))
    }

    #[tokio::test]
    async fn reads_are_served_from_cache_until_invalidated() {
        let client = client(&["Ann", "Bob"]);
        let all = SearchPattern::default();

        assert_eq!(client.count_others(all.clone(), vec![]).await.unwrap(), 2);
        client
            .create_contact(NewContact::new("Cid", "Doe", vec!["555".to_string()]))
            .await
            .unwrap();
        assert_eq!(client.count_others(all.clone(), vec![]).await.unwrap(), 2);

        client.invalidate(&ResultSetKey::all(ResultSetKind::Count)).unwrap();
        assert_eq!(client.count_others(all, vec![]).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn rejected_create_maps_to_validation() {
        let client = client(&[]);
        let err = client
            .create_contact(NewContact::new("Ann", "", vec!["555".to_string()]))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn service_errors_map_to_transport() {
        let client = client(&[]);
        let err = client.delete_contact(ContactId::new(5)).await.unwrap_err();
        assert!(matches!(err, PhonebookError::Transport(_)));
    }
}
