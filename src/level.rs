//! Structured logcat line recognition.
//!
//! A structured line looks like
//! `07-26 14:35:00.003  1646  1660 E memtrack: Couldn't load memtrack module`:
//! date and time, pid, tid, a one-letter level, the tag, a colon, then the message.

use std::sync::LazyLock;

use regex::Regex;

static LOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<timestamp>\d\d-\d\d \d\d:\d\d:\d\d.\d*)\s*(?P<pid>\d*)\s*(?P<tid>\d*)\s*(?P<level>(?i:[VDIWEFS]))\s*(?P<tag>.*)\s*:\s*(?P<message>.*)$",
    )
    .expect("log line pattern is valid")
});

/// Severity code of a structured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    /// Should never show up in a real log, still handled.
    Silent,
}

impl Level {
    /// Case-insensitive lookup of a level letter.
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'V' => Some(Level::Verbose),
            'D' => Some(Level::Debug),
            'I' => Some(Level::Info),
            'W' => Some(Level::Warn),
            'E' => Some(Level::Error),
            'F' => Some(Level::Fatal),
            'S' => Some(Level::Silent),
            _ => None,
        }
    }
}

/// Parsed parts of a structured line, borrowed from the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<'a> {
    pub timestamp: &'a str,
    pub pid: Option<u32>,
    pub tid: Option<u32>,
    pub level: Level,
    pub tag: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub raw: &'a str,
    fields: Option<Fields<'a>>,
}

impl<'a> LogLine<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self { raw, fields: parse_fields(raw) }
    }

    /// `None` when the line is not in the structured format.
    pub fn fields(&self) -> Option<&Fields<'a>> {
        self.fields.as_ref()
    }

    pub fn level(&self) -> Option<Level> {
        self.fields.as_ref().map(|f| f.level)
    }
}

fn parse_fields(raw: &str) -> Option<Fields<'_>> {
    let caps = LOG_LINE.captures(raw)?;
    let level = caps
        .name("level")
        .and_then(|m| m.as_str().chars().next())
        .and_then(Level::from_code)?;
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse().ok());
    let text = |name: &str| caps.name(name).map_or("", |m| m.as_str());

    Some(Fields {
        timestamp: text("timestamp"),
        pid: number("pid"),
        tid: number("tid"),
        level,
        tag: text("tag").trim_end(),
        message: text("message"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields_of_a_structured_line() {
        let line = LogLine::parse("07-26 14:35:00.003  1646  1660 E memtrack: Couldn't load memtrack module");
        let fields = line.fields().expect("structured line");
        assert_eq!(fields.timestamp, "07-26 14:35:00.003");
        assert_eq!(fields.pid, Some(1646));
        assert_eq!(fields.tid, Some(1660));
        assert_eq!(fields.level, Level::Error);
        assert_eq!(fields.tag, "memtrack");
        assert_eq!(fields.message, "Couldn't load memtrack module");
    }

    #[test]
    fn recognizes_every_level_in_either_case() {
        for (code, level) in [
            ('V', Level::Verbose),
            ('D', Level::Debug),
            ('I', Level::Info),
            ('W', Level::Warn),
            ('E', Level::Error),
            ('F', Level::Fatal),
            ('S', Level::Silent),
        ] {
            for c in [code, code.to_ascii_lowercase()] {
                let raw = format!("07-26 14:35:00.003  1646  1660 {c} tag: message");
                assert_eq!(LogLine::parse(&raw).level(), Some(level), "level {c}");
            }
        }
    }

    #[test]
    fn unstructured_lines_have_no_fields() {
        assert_eq!(LogLine::parse("hello world").fields(), None);
        assert_eq!(LogLine::parse("").fields(), None);
        assert_eq!(LogLine::parse("--------- beginning of main").fields(), None);
        assert_eq!(LogLine::parse("07-26 14:35:00.003  1646  1660 X tag: message").fields(), None);
    }

    #[test]
    fn pattern_is_anchored_at_the_start() {
        assert_eq!(LogLine::parse("prefix 07-26 14:35:00.003  1646  1660 E tag: message").level(), None);
    }

    #[test]
    fn tag_extends_to_the_last_colon() {
        let line = LogLine::parse("07-26 14:35:00.003  1646  1660 I ActivityManager: Start proc: com.example");
        let fields = line.fields().expect("structured line");
        assert_eq!(fields.tag, "ActivityManager: Start proc");
        assert_eq!(fields.message, "com.example");
    }

    #[test]
    fn missing_ids_are_tolerated() {
        let line = LogLine::parse("07-26 14:35:00.003 W tag : low memory");
        let fields = line.fields().expect("structured line");
        assert_eq!(fields.pid, None);
        assert_eq!(fields.tid, None);
        assert_eq!(fields.level, Level::Warn);
        assert_eq!(fields.tag, "tag");
    }

    #[test]
    fn raw_text_is_kept_unmodified() {
        let raw = "07-26 14:35:00.003  1646  1660 W memtrack: low memory";
        assert_eq!(LogLine::parse(raw).raw, raw);
    }
}
