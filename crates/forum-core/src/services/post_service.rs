use std::sync::Arc;

use crate::authorization::ensure_owner;
use crate::domain::{Post, PostDraft};
use crate::error::{DomainError, RepoError};
use crate::pagination::{Page, PageRequest};
use crate::ports::PostRepository;

/// Post operations with ownership enforcement.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Create a post owned by `identity`.
    pub async fn create(&self, identity: &str, draft: PostDraft) -> Result<Post, DomainError> {
        let new_post = draft.with_owner(identity);
        new_post.validate()?;

        let post = self
            .posts
            .create_post(new_post)
            .await
            .map_err(|e| match e {
                RepoError::Constraint(msg) => DomainError::Conflict(msg),
                other => DomainError::Internal(other.to_string()),
            })?;

        tracing::info!(post_id = post.id, owner = %post.owner, "post created");
        Ok(post)
    }

    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        check_id(id)?;
        self.fetch(id).await
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Post>, DomainError> {
        let posts = self
            .posts
            .list_posts(page.limit(), page.offset())
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let total = self
            .posts
            .count_posts()
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Page::new(posts, page, total))
    }

    /// Replace the content of a post owned by `identity`.
    pub async fn update(
        &self,
        identity: &str,
        id: i64,
        content: &str,
    ) -> Result<Post, DomainError> {
        check_id(id)?;
        if content.trim().is_empty() {
            return Err(DomainError::InvalidArgument("content is required".to_string()));
        }

        let current = self.fetch(id).await?;
        ensure_owner(identity, &current.owner)?;

        let post = self
            .posts
            .update_post(id, content)
            .await
            .map_err(|e| DomainError::from_repo(e, "post", id))?;

        tracing::info!(post_id = id, owner = %identity, "post updated");
        Ok(post)
    }

    /// Delete a post owned by `identity`.
    pub async fn delete(&self, identity: &str, id: i64) -> Result<(), DomainError> {
        check_id(id)?;

        let current = self.fetch(id).await?;
        ensure_owner(identity, &current.owner)?;

        self.posts
            .delete_post(id)
            .await
            .map_err(|e| DomainError::from_repo(e, "post", id))?;

        tracing::info!(post_id = id, owner = %identity, "post deleted");
        Ok(())
    }

    async fn fetch(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .get_post(id)
            .await
            .map_err(|e| DomainError::from_repo(e, "post", id))
    }
}

fn check_id(id: i64) -> Result<(), DomainError> {
    if id < 1 {
        return Err(DomainError::InvalidArgument(format!(
            "id must be at least 1, got {id}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::fixtures;
    use crate::services::testing::FakeStore;

    fn service() -> (PostService, Arc<FakeStore>) {
        let store = Arc::new(FakeStore::default());
        (PostService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_create_uses_identity_as_owner() {
        let mut rng = StdRng::seed_from_u64(1);
        let (service, _) = service();
        let draft = fixtures::random_draft(&mut rng);

        let post = service.create("alice", draft.clone()).await.unwrap();

        assert_eq!(post.owner, "alice");
        assert_eq!(post.image, draft.image);
        assert_eq!(post.title, draft.title);
        assert_eq!(post.subtitle, draft.subtitle);
        assert_eq!(post.content, draft.content);
        assert!(post.id > 0);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_fields() {
        let mut rng = StdRng::seed_from_u64(2);
        let (service, store) = service();
        let mut draft = fixtures::random_draft(&mut rng);
        draft.title = String::new();

        let result = service.create("alice", draft).await;

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert_eq!(store.post_count(), 0);
    }

    #[tokio::test]
    async fn test_create_conflict_is_classified() {
        let mut rng = StdRng::seed_from_u64(3);
        let (service, store) = service();
        store.fail_next_with(RepoError::Constraint("foreign key".into()));

        let result = service.create("ghost", fixtures::random_draft(&mut rng)).await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_round_trip() {
        let mut rng = StdRng::seed_from_u64(4);
        let (service, _) = service();
        let created = service
            .create("alice", fixtures::random_draft(&mut rng))
            .await
            .unwrap();

        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (service, _) = service();
        let result = service.get(999999).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_rejects_non_positive_id() {
        let (service, _) = service();
        assert!(matches!(
            service.get(0).await,
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_get_internal_failure() {
        let (service, store) = service();
        store.fail_next_with(RepoError::Connection("connection reset".into()));
        assert!(matches!(
            service.get(1).await,
            Err(DomainError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let (service, _) = service();
        for _ in 0..12 {
            service
                .create("alice", fixtures::random_draft(&mut rng))
                .await
                .unwrap();
        }

        let page = service.list(PageRequest::new(3, 5).unwrap()).await.unwrap();

        assert_eq!(page.current_page, 3);
        assert_eq!(page.page_size, 5);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.total_records, 12);
        let ids: Vec<i64> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![11, 12]);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let (service, _) = service();
        let page = service.list(PageRequest::new(1, 5).unwrap()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.last_page, 0);
        assert_eq!(page.total_records, 0);
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let mut rng = StdRng::seed_from_u64(6);
        let (service, _) = service();
        let created = service
            .create("alice", fixtures::random_draft(&mut rng))
            .await
            .unwrap();

        let updated = service
            .update("alice", created.id, "new content")
            .await
            .unwrap();

        assert_eq!(updated.content, "new content");
        assert_eq!(updated.owner, "alice");
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_by_other_user_is_forbidden() {
        let mut rng = StdRng::seed_from_u64(7);
        let (service, _) = service();
        let created = service
            .create("alice", fixtures::random_draft(&mut rng))
            .await
            .unwrap();

        let result = service.update("bob", created.id, "hijacked").await;

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found_before_ownership() {
        let (service, _) = service();
        let result = service.update("bob", 42, "content").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_content() {
        let mut rng = StdRng::seed_from_u64(8);
        let (service, _) = service();
        let created = service
            .create("alice", fixtures::random_draft(&mut rng))
            .await
            .unwrap();

        let result = service.update("alice", created.id, "  ").await;

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let mut rng = StdRng::seed_from_u64(9);
        let (service, store) = service();
        let created = service
            .create("alice", fixtures::random_draft(&mut rng))
            .await
            .unwrap();

        service.delete("alice", created.id).await.unwrap();

        assert_eq!(store.post_count(), 0);
        assert!(matches!(
            service.get(created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_by_other_user_is_forbidden() {
        let mut rng = StdRng::seed_from_u64(10);
        let (service, store) = service();
        let created = service
            .create("alice", fixtures::random_draft(&mut rng))
            .await
            .unwrap();

        let result = service.delete("bob", created.id).await;

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
        assert_eq!(store.post_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let (service, _) = service();
        let result = service.delete("alice", 999999).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
