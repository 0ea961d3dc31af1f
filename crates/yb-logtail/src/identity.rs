// ABOUTME: Builds the stable request identity a log-tail session reopens on every attempt.
// ABOUTME: Runtime logs pass the app name through; build logs use push-log:<app>:<tag>.

use std::fmt;

use yb_proto::RequestIdentity;

use crate::error::InvalidArgument;

/// Prefix of composite build-log ids.
pub const PUSH_LOG_PREFIX: &str = "push-log";

/// Separator between the parts of a composite build-log id.
pub const PUSH_LOG_SEPARATOR: char = ':';

/// Which log RPC a target addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSource {
    /// Runtime output of a running application (`AppLog`).
    Runtime,
    /// Output of an image build triggered by a push (`ImgBuildLog`).
    Build,
}

/// The identity of one logical log stream.
///
/// Computed once per session; every reconnect opens the same stream with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamTarget {
    source: LogSource,
    key: String,
}

impl StreamTarget {
    /// Target the runtime log of the resource named by the first argument.
    ///
    /// Extra arguments are ignored.
    pub fn for_runtime_log<S: AsRef<str>>(args: &[S]) -> Result<Self, InvalidArgument> {
        let name = args
            .first()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InvalidArgument("application name is required".to_string()))?;
        Ok(Self {
            source: LogSource::Runtime,
            key: name.to_string(),
        })
    }

    /// Target the build log of `app` at `tag`.
    ///
    /// Both parts go into the key verbatim and may not contain the separator,
    /// so distinct pairs always map to distinct keys.
    pub fn for_build_log(app: &str, tag: &str) -> Result<Self, InvalidArgument> {
        let app = build_part("application name", app)?;
        let tag = build_part("tag", tag)?;
        Ok(Self {
            source: LogSource::Build,
            key: format!(
                "{PUSH_LOG_PREFIX}{PUSH_LOG_SEPARATOR}{app}{PUSH_LOG_SEPARATOR}{tag}"
            ),
        })
    }

    pub fn source(&self) -> LogSource {
        self.source
    }

    /// The opaque key sent to the server.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Request message for this target.
    pub fn to_request(&self) -> RequestIdentity {
        RequestIdentity {
            name: self.key.clone(),
        }
    }
}

impl fmt::Display for StreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            LogSource::Runtime => write!(f, "runtime log of '{}'", self.key),
            LogSource::Build => write!(f, "build log '{}'", self.key),
        }
    }
}

/// Parts are used verbatim; anything that would have to be trimmed or
/// escaped to fit the key is rejected.
fn build_part<'a>(what: &str, value: &'a str) -> Result<&'a str, InvalidArgument> {
    if value.trim().is_empty() {
        return Err(InvalidArgument(format!("{what} is required")));
    }
    if value.trim() != value {
        return Err(InvalidArgument(format!(
            "{what} '{value}' must not start or end with whitespace"
        )));
    }
    if value.contains(PUSH_LOG_SEPARATOR) {
        return Err(InvalidArgument(format!(
            "{what} '{value}' must not contain '{PUSH_LOG_SEPARATOR}'"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_log_uses_first_argument() {
        let target = StreamTarget::for_runtime_log(&["web", "ignored"]).unwrap();
        assert_eq!(target.source(), LogSource::Runtime);
        assert_eq!(target.key(), "web");
        assert_eq!(target.to_request().name, "web");
    }

    #[test]
    fn test_runtime_log_requires_name() {
        let empty: [&str; 0] = [];
        assert!(StreamTarget::for_runtime_log(&empty).is_err());
        assert!(StreamTarget::for_runtime_log(&["   "]).is_err());
    }

    #[test]
    fn test_runtime_log_is_deterministic() {
        let a = StreamTarget::for_runtime_log(&["web"]).unwrap();
        let b = StreamTarget::for_runtime_log(&[String::from("web")]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_log_format() {
        let target = StreamTarget::for_build_log("shop", "v3").unwrap();
        assert_eq!(target.source(), LogSource::Build);
        assert_eq!(target.key(), "push-log:shop:v3");
    }

    #[test]
    fn test_build_log_is_deterministic() {
        assert_eq!(
            StreamTarget::for_build_log("shop", "v3").unwrap(),
            StreamTarget::for_build_log("shop", "v3").unwrap()
        );
    }

    #[test]
    fn test_build_log_adjacent_strings_do_not_collide() {
        let a = StreamTarget::for_build_log("app", "1-2").unwrap();
        let b = StreamTarget::for_build_log("app-1", "2").unwrap();
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_build_log_distinct_pairs_do_not_collide() {
        let pairs = [
            ("app", "12"),
            ("app1", "2"),
            ("ap", "p12"),
            ("app", "1-2"),
            ("app-1", "2"),
            ("app-", "12"),
        ];
        let mut keys: Vec<String> = pairs
            .iter()
            .map(|(app, tag)| StreamTarget::for_build_log(app, tag).unwrap().key().to_string())
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), pairs.len());
    }

    #[test]
    fn test_build_log_whitespace_variants_do_not_collide() {
        let plain = StreamTarget::for_build_log("app", "v1").unwrap();
        for (app, tag) in [(" app", "v1 "), ("app ", "v1"), ("app", "\tv1")] {
            match StreamTarget::for_build_log(app, tag) {
                Ok(other) => assert_ne!(plain.key(), other.key(), "({app:?}, {tag:?})"),
                Err(err) => assert!(err.0.contains("whitespace"), "{err}"),
            }
        }
    }

    #[test]
    fn test_build_log_rejects_surrounding_whitespace() {
        assert!(StreamTarget::for_build_log(" app", "v1").is_err());
        assert!(StreamTarget::for_build_log("app", "v1\n").is_err());
        assert!(StreamTarget::for_build_log("my app", "v1").is_ok());
    }

    #[test]
    fn test_build_log_rejects_separator() {
        let err = StreamTarget::for_build_log("a:b", "c").unwrap_err();
        assert!(err.0.contains("must not contain"));
        assert!(StreamTarget::for_build_log("a", "b:c").is_err());
    }

    #[test]
    fn test_build_log_rejects_blank_parts() {
        assert!(StreamTarget::for_build_log("", "v1").is_err());
        assert!(StreamTarget::for_build_log("shop", " ").is_err());
    }

    #[test]
    fn test_display() {
        let target = StreamTarget::for_runtime_log(&["web"]).unwrap();
        assert_eq!(target.to_string(), "runtime log of 'web'");
        let target = StreamTarget::for_build_log("web", "v1").unwrap();
        assert_eq!(target.to_string(), "build log 'push-log:web:v1'");
    }
}
