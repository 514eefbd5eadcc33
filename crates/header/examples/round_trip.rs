use std::time::{Duration, SystemTime, UNIX_EPOCH};

use micro_header::{Indexed, Record, header_record};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Default)]
struct Common {
    request_id: String,
}

header_record! {
    Common {
        request_id: "X-Request-Id",
    }
}

#[derive(Debug, Default)]
struct Upload {
    common: Common,
    content_type: String,
    length: u64,
    modified: Option<SystemTime>,
    tags: Vec<String>,
    checksum: Option<String>,
    inline: bool,
    parts: Indexed<String>,
}

header_record! {
    Upload {
        #[embed] common,
        content_type: "Content-Type",
        length: "Content-Length",
        modified: "Last-Modified,unix",
        tags: "X-Tag,omitempty",
        checksum: "X-Checksum,omitempty",
        inline: "X-Inline,int",
        #[custom] parts: "X-Part",
    }
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let upload = Upload {
        common: Common { request_id: "42".into() },
        content_type: "application/octet-stream".into(),
        length: 1024,
        modified: Some(UNIX_EPOCH + Duration::from_secs(946_730_096)),
        tags: vec!["backup".into(), "weekly".into()],
        checksum: None,
        inline: true,
        parts: Indexed(vec!["head".into(), "tail".into()]),
    };

    let headers = match upload.to_headers() {
        Ok(headers) => headers,
        Err(e) => {
            error!(cause = %e, "encode upload error");
            return;
        }
    };

    for (name, value) in &headers {
        info!(%name, value = ?value, "encoded header");
    }

    match Upload::from_headers(&headers) {
        Ok(decoded) => info!(?decoded, "decoded upload"),
        Err(e) => error!(cause = %e, "decode upload error"),
    }
}
