use std::time::SystemTime;

use micro_header::{HeaderMap, HeaderName, HeaderValue, Indexed, header_record};

/// One fixture benchmarked under a size group.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile) -> Self {
        Self { name, group, file }
    }

    pub fn small(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Small, file)
    }

    pub fn normal(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Normal, file)
    }

    pub fn large(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Large, file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }
}

/// A header fixture: one `Name: value` per line.
#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }

    /// Parses the lines of the file, keeping repeated names in order.
    ///
    /// # Panics
    ///
    /// Panics when a line is not a valid header; fixtures are checked in with the benches.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for line in self.content.lines().filter(|line| !line.is_empty()) {
            let Some((name, value)) = line.split_once(':') else {
                panic!("{}: `{line}` is not `Name: value`", self.file_name);
            };
            let name = HeaderName::try_from(name.trim()).unwrap_or_else(|e| panic!("{}: {e}", self.file_name));
            let value = HeaderValue::try_from(value.trim()).unwrap_or_else(|e| panic!("{}: {e}", self.file_name));
            headers.append(name, value);
        }
        headers
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

impl TestGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestGroup::Small => "small",
            TestGroup::Normal => "normal",
            TestGroup::Large => "large",
        }
    }
}

/// A push notification record, the typical shape decoded on every webhook request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Notification {
    pub channel_id: String,
    pub channel_token: String,
    pub channel_expiration: Option<SystemTime>,
    pub resource_id: String,
    pub resource_uri: String,
    pub resource_state: String,
    pub message_number: u64,
    pub changed: Vec<String>,
    pub forwarded_for: Vec<String>,
    pub request_start: Option<SystemTime>,
    pub debug: bool,
    pub args: Indexed<String>,
}

header_record! {
    Notification {
        channel_id: "X-Goog-Channel-ID",
        channel_token: "X-Goog-Channel-Token,omitempty",
        channel_expiration: "X-Goog-Channel-Expiration,omitempty",
        resource_id: "X-Goog-Resource-ID",
        resource_uri: "X-Goog-Resource-URI",
        resource_state: "X-Goog-Resource-State",
        message_number: "X-Goog-Message-Number",
        changed: "X-Goog-Changed,omitempty",
        forwarded_for: "X-Forwarded-For,omitempty",
        request_start: "X-Request-Start,unix,omitempty",
        debug: "X-Debug,int",
        #[custom] args: "Arg",
    }
}
