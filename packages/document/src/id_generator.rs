use crc32fast::Hasher;

/// Derive a short, stable seed from a page id using CRC32
pub fn get_document_id(page_id: &str) -> String {
    let mut buff = String::from(page_id);
    if !page_id.starts_with("page://") {
        buff = format!("page://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for elements within a page
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String, // Page seed (CRC32)
    count: u32,   // Sequential counter
}

impl IDGenerator {
    pub fn new(page_id: &str) -> Self {
        Self {
            seed: get_document_id(page_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential ID
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Generate the next ID not rejected by `taken`.
    ///
    /// Stored pages carry ids minted by earlier sessions with the same seed,
    /// so the counter alone cannot guarantee freshness.
    pub fn fresh_id(&mut self, taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.new_id();
            if !taken(&id) {
                return id;
            }
        }
    }

    /// Get page seed
    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_generation() {
        let id1 = get_document_id("home");
        let id2 = get_document_id("home");

        // Same page always generates same seed
        assert_eq!(id1, id2);

        // Different pages generate different seeds
        let id3 = get_document_id("about");
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IDGenerator::new("home");

        let id1 = gen.new_id();
        let id2 = gen.new_id();
        let id3 = gen.new_id();

        assert!(id1.ends_with("-1"));
        assert!(id2.ends_with("-2"));
        assert!(id3.ends_with("-3"));

        let seed = gen.seed();
        assert!(id1.starts_with(seed));
        assert!(id3.starts_with(seed));
    }

    #[test]
    fn test_fresh_id_skips_taken() {
        let mut gen = IDGenerator::from_seed("abc".to_string());
        let taken = ["abc-1".to_string(), "abc-2".to_string()];

        let id = gen.fresh_id(|candidate| taken.iter().any(|t| t == candidate));
        assert_eq!(id, "abc-3");
    }
}
