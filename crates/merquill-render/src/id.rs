use uuid::Uuid;

pub const DEFAULT_ID_PREFIX: &str = "merquill";

/// Source of container ids. Injected so tests can force collisions.
pub trait ContainerIdGenerator {
    fn generate(&self) -> String;
}

/// `{prefix}-{timestamp_base36}-{token_a}-{token_b}`: a millisecond timestamp plus two
/// independent random tokens, so concurrent calls in one process do not collide.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    prefix: String,
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }
}

impl RandomIdGenerator {
    /// The prefix is sanitized so generated ids stay usable as element ids and file names.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: sanitize_container_id(prefix),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl ContainerIdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        let id = format!(
            "{}-{}-{}-{}",
            self.prefix,
            to_base36(millis),
            random_token(),
            random_token()
        );
        tracing::debug!(container_id = %id, "generated container id");
        id
    }
}

/// Eight base-36 digits drawn from the random bits of a v4 uuid.
fn random_token() -> String {
    // 41 bits fit in eight base-36 digits; the low 64 bits of a v4 uuid are random apart from
    // the two variant bits at the top.
    let n = (Uuid::new_v4().as_u128() as u64) & ((1 << 41) - 1);
    format!("{:0>8}", to_base36(n))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Normalizes a caller-supplied container id.
///
/// Characters outside `[A-Za-z0-9_-]` become `-`, runs of `-` collapse and edge dashes are
/// dropped; ids that do not start with a letter get the `merquill-` prefix. Input with nothing
/// usable left yields `merquill-untitled`.
pub fn sanitize_container_id(raw: &str) -> String {
    const UNTITLED: &str = "merquill-untitled";

    let raw = raw.trim();
    if raw.is_empty() {
        return UNTITLED.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
        out.push(if ok { ch } else { '-' });
    }
    while out.contains("--") {
        out = out.replace("--", "-");
    }

    let out = out.trim_matches('-');
    if out.is_empty() {
        return UNTITLED.to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        out.to_string()
    } else {
        format!("{DEFAULT_ID_PREFIX}-{out}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn generated_ids_have_four_parts() {
        let ids = RandomIdGenerator::default();
        let id = ids.generate();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 4, "{id}");
        assert_eq!(parts[0], "merquill");
        assert_eq!(parts[2].len(), 8);
        assert_eq!(parts[3].len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }

    #[test]
    fn generated_ids_differ() {
        let ids = RandomIdGenerator::with_prefix("doc");
        let a = ids.generate();
        let b = ids.generate();
        assert_ne!(a, b);
        assert!(a.starts_with("doc-"));
    }

    #[test]
    fn sanitize_keeps_plain_ids() {
        assert_eq!(sanitize_container_id("chart_1"), "chart_1");
        assert_eq!(sanitize_container_id("my-diagram"), "my-diagram");
    }

    #[test]
    fn sanitize_rewrites_unsafe_ids() {
        assert_eq!(sanitize_container_id("  "), "merquill-untitled");
        assert_eq!(sanitize_container_id("9 lives"), "merquill-9-lives");
        assert_eq!(sanitize_container_id("a<b>\"c\""), "a-b-c");
        assert_eq!(sanitize_container_id("--"), "merquill-untitled");
    }

    #[test]
    fn default_prefix_is_kept() {
        assert_eq!(RandomIdGenerator::default().prefix(), DEFAULT_ID_PREFIX);
        assert_eq!(sanitize_container_id("merquill"), "merquill");
    }

    #[test]
    fn tokens_are_eight_base36_digits() {
        for _ in 0..64 {
            let token = random_token();
            assert_eq!(token.len(), 8, "{token}");
            assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }
}
