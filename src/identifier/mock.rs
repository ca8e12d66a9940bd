use super::Identifier;
use crate::capture::ImagePayload;
use crate::error::Result;
use async_trait::async_trait;
use object_finder_common::{IdentificationResult, CATALOG};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// カタログから一様ランダムに1件返すスタブ
///
/// 読み込み中表示を確認できるよう、応答前に `delay` だけ待つ
pub struct MockIdentifier {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl MockIdentifier {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// 乱数シードを固定して作成
    pub fn with_seed(delay: Duration, seed: u64) -> Self {
        Self {
            delay,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl Identifier for MockIdentifier {
    async fn identify(&self, image: &ImagePayload) -> Result<IdentificationResult> {
        tokio::time::sleep(self.delay).await;

        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(0..CATALOG.len())
        };
        let result = CATALOG[index].to_result();
        tracing::debug!(image = image.short_id(), name = %result.name, "mock identification");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn image() -> ImagePayload {
        ImagePayload::from_data_uri("data:image/png;base64,QUFB").unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_catalog_entry_after_delay() {
        let identifier = MockIdentifier::with_seed(Duration::from_millis(1500), 7);
        let start = tokio::time::Instant::now();

        let result = identifier.identify(&image()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert!(CATALOG.iter().any(|e| e.name == result.name && e.points == result.points));
        assert_eq!(result.facts.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_seed_same_sequence() {
        let a = MockIdentifier::with_seed(Duration::ZERO, 42);
        let b = MockIdentifier::with_seed(Duration::ZERO, 42);
        for _ in 0..10 {
            assert_eq!(
                a.identify(&image()).await.unwrap(),
                b.identify(&image()).await.unwrap()
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_covers_catalog() {
        let identifier = MockIdentifier::with_seed(Duration::ZERO, 1);
        let mut names = HashSet::new();
        for _ in 0..200 {
            names.insert(identifier.identify(&image()).await.unwrap().name);
        }
        assert_eq!(names.len(), CATALOG.len());
    }
}
