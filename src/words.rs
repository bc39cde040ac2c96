use include_dir::{include_dir, Dir};
use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

pub const DEFAULT_WORD_SOURCE_URL: &str = "https://random-word-api.herokuapp.com/word";
pub const BUNDLED_LIST: &str = "space";

/// Substituted whenever a provider fails
pub const FALLBACK_WORDS: [&str; 10] = [
    "alien", "invader", "space", "galaxy", "cosmic", "nebula", "star", "meteor", "planet", "ufo",
];

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("word provider answered with status {0}")]
    Status(u16),

    #[error("malformed word list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("bundled word list not found: {0}")]
    Missing(String),

    #[error("word provider returned no usable words")]
    Empty,
}

/// Non-empty set of lowercase, single-token words that targets draw their text from
#[derive(Debug, Clone, PartialEq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    pub fn new<I, S>(words: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty() && !w.chars().any(char::is_whitespace))
            .collect();

        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    pub fn fallback() -> Self {
        Self {
            words: FALLBACK_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Supplies candidate target texts
pub trait WordProvider: Send + Sync + 'static {
    fn fetch(&self, count: usize) -> Result<Vec<String>, FetchError>;

    fn describe(&self) -> String;
}

/// Remote word list answering `GET {url}?number={count}` with a JSON array of strings
#[derive(Debug, Clone)]
pub struct HttpWordProvider {
    url: String,
}

impl HttpWordProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for HttpWordProvider {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_SOURCE_URL)
    }
}

impl WordProvider for HttpWordProvider {
    fn fetch(&self, count: usize) -> Result<Vec<String>, FetchError> {
        let response = reqwest::blocking::Client::new()
            .get(&self.url)
            .query(&[("number", count)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        let words: Vec<String> = serde_json::from_str(&body)?;
        debug!(url = %self.url, received = words.len(), "Fetched word list");
        Ok(words)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[derive(Deserialize, Clone, Debug)]
struct WordList {
    name: String,
    size: u32,
    words: Vec<String>,
}

/// Word list compiled into the binary, used in offline mode
#[derive(Debug, Clone)]
pub struct BundledWordProvider {
    name: String,
}

impl BundledWordProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn read(&self) -> Result<WordList, FetchError> {
        let file_name = format!("{}.json", self.name);
        let contents = LANG_DIR
            .get_file(&file_name)
            .and_then(|f| f.contents_utf8())
            .ok_or_else(|| FetchError::Missing(file_name.clone()))?;

        let list: WordList = serde_json::from_str(contents)?;
        debug!(name = %list.name, size = list.size, "Read bundled word list");
        Ok(list)
    }
}

impl Default for BundledWordProvider {
    fn default() -> Self {
        Self::new(BUNDLED_LIST)
    }
}

impl WordProvider for BundledWordProvider {
    fn fetch(&self, count: usize) -> Result<Vec<String>, FetchError> {
        let list = self.read()?;
        let mut rng = rand::thread_rng();

        Ok(list
            .words
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect())
    }

    fn describe(&self) -> String {
        format!("bundled:{}", self.name)
    }
}

/// Always answers with the same words
#[derive(Debug, Clone)]
pub struct StaticWordProvider(pub Vec<String>);

impl WordProvider for StaticWordProvider {
    fn fetch(&self, _count: usize) -> Result<Vec<String>, FetchError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} words", self.0.len())
    }
}

/// Fetches once from `provider`; any failure yields the fallback pool
pub fn load_pool(provider: &dyn WordProvider, count: usize) -> WordPool {
    let result = provider
        .fetch(count)
        .and_then(|words| WordPool::new(words).ok_or(FetchError::Empty));

    match result {
        Ok(pool) => {
            info!(source = %provider.describe(), words = pool.len(), "Word pool ready");
            pool
        }
        Err(error) => {
            warn!(source = %provider.describe(), %error, "Word fetch failed, using fallback list");
            WordPool::fallback()
        }
    }
}

/// A word fetch running on a background thread
#[derive(Debug)]
pub struct PendingWords {
    rx: Receiver<WordPool>,
}

impl PendingWords {
    pub fn spawn(provider: Arc<dyn WordProvider>, count: usize) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let pool = load_pool(provider.as_ref(), count);
            // Receiver is gone when a newer fetch superseded this one
            let _ = tx.send(pool);
        });

        Self { rx }
    }

    /// Returns the pool once the fetch has finished
    pub fn try_take(&self) -> Option<WordPool> {
        match self.rx.try_recv() {
            Ok(pool) => Some(pool),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(WordPool::fallback()),
        }
    }

    pub fn wait(self) -> WordPool {
        self.rx.recv().unwrap_or_else(|_| WordPool::fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    struct FailingProvider;

    impl WordProvider for FailingProvider {
        fn fetch(&self, _count: usize) -> Result<Vec<String>, FetchError> {
            Err(FetchError::Status(503))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_pool_normalizes_words() {
        let pool = WordPool::new(["Alien", "  Nebula ", "", "two words", "\t"]).unwrap();
        assert_eq!(pool.words(), &["alien".to_string(), "nebula".to_string()]);
    }

    #[test]
    fn test_pool_rejects_empty() {
        assert!(WordPool::new(Vec::<String>::new()).is_none());
        assert!(WordPool::new(["", "   "]).is_none());
    }

    #[test]
    fn test_fallback_pool() {
        let pool = WordPool::fallback();
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.words()[0], "alien");
        assert_eq!(pool.words()[9], "ufo");
    }

    #[test]
    fn test_choose_stays_in_pool() {
        let pool = WordPool::new(["orbit", "comet"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let word = pool.choose(&mut rng);
            assert!(word == "orbit" || word == "comet");
        }
    }

    #[test]
    fn test_load_pool_failure_uses_fallback() {
        let pool = load_pool(&FailingProvider, 25);
        assert_eq!(pool, WordPool::fallback());
    }

    #[test]
    fn test_load_pool_empty_result_uses_fallback() {
        let pool = load_pool(&StaticWordProvider(vec![" ".to_string()]), 25);
        assert_eq!(pool, WordPool::fallback());
    }

    #[test]
    fn test_load_pool_static() {
        let provider = StaticWordProvider(vec!["warp".to_string(), "drift".to_string()]);
        let pool = load_pool(&provider, 2);
        assert_eq!(pool.words(), &["warp".to_string(), "drift".to_string()]);
    }

    #[test]
    fn test_bundled_list() {
        let words = BundledWordProvider::default().fetch(20).unwrap();
        assert_eq!(words.len(), 20);
        assert!(words.iter().all(|w| !w.is_empty()));
    }

    #[test]
    fn test_bundled_list_missing() {
        let result = BundledWordProvider::new("klingon").fetch(5);
        assert!(matches!(result, Err(FetchError::Missing(_))));
    }

    #[test]
    fn test_pending_words_wait() {
        let provider: Arc<dyn WordProvider> =
            Arc::new(StaticWordProvider(vec!["quasar".to_string()]));
        let pending = PendingWords::spawn(provider, 1);
        assert_eq!(pending.wait().words(), &["quasar".to_string()]);
    }

    #[test]
    fn test_pending_words_failure_resolves_to_fallback() {
        let pending = PendingWords::spawn(Arc::new(FailingProvider), 5);
        assert_eq!(pending.wait(), WordPool::fallback());
    }
}
