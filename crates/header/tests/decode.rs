use std::time::{Duration, SystemTime, UNIX_EPOCH};

use micro_header::protocol::ScalarError;
use micro_header::{Dynamic, Error, HeaderMap, HeaderValue, Indexed, Record, decode, header_record};

fn headers(entries: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in entries {
        headers.append(*name, HeaderValue::from_static(*value));
    }
    headers
}

/// 2000-01-01T12:34:56Z
fn y2k() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(946_730_096)
}

#[derive(Debug, Default, PartialEq)]
struct Calendar {
    channel_id: String,
    channel_token: String,
    channel_expiration: Option<SystemTime>,
    resource_id: String,
    resource_uri: String,
    resource_state: String,
    message_number: i32,
}

header_record! {
    Calendar {
        channel_id: "X-Goog-Channel-ID",
        channel_token: "X-Goog-Channel-Token,omitempty",
        channel_expiration: "X-Goog-Channel-Expiration,omitempty",
        resource_id: "X-Goog-Resource-ID",
        resource_uri: "X-Goog-Resource-URI",
        resource_state: "X-Goog-Resource-State",
        message_number: "X-Goog-Message-Number",
    }
}

#[test]
fn calendar_notification() {
    for state in ["sync", "exists", "not_exists"] {
        let src = headers(&[
            ("X-Goog-Channel-ID", "channel-ID-value"),
            ("X-Goog-Channel-Token", "channel-token-value"),
            ("X-Goog-Channel-Expiration", "Tue, 19 Nov 2013 01:13:52 GMT"),
            ("X-Goog-Resource-ID", "identifier-for-the-watched-resource"),
            ("X-Goog-Resource-URI", "version-specific-URI-of-the-watched-resource"),
            ("X-Goog-Message-Number", "1"),
            ("X-Goog-Resource-State", state),
        ]);

        let calendar = Calendar::from_headers(&src).unwrap();

        assert_eq!(
            calendar,
            Calendar {
                channel_id: "channel-ID-value".into(),
                channel_token: "channel-token-value".into(),
                channel_expiration: Some(UNIX_EPOCH + Duration::from_secs(1_384_823_632)),
                resource_id: "identifier-for-the-watched-resource".into(),
                resource_uri: "version-specific-URI-of-the-watched-resource".into(),
                resource_state: state.into(),
                message_number: 1,
            }
        );
    }
}

#[derive(Debug, Default, PartialEq)]
struct Simple {
    foo: String,
    bar: i64,
}

header_record! {
    Simple {
        foo,
        bar,
    }
}

#[derive(Debug, PartialEq)]
struct FullType {
    un_export: String,
    un_export_two: String,
    bool: bool,
    bool_int: bool,
    string: String,
    string_empty: String,
    string_empty_ignore: String,
    uint: usize,
    uint64: u64,
    uint8: u8,
    uint16: u16,
    uint32: u32,
    int: isize,
    int64: i64,
    int8: i8,
    int16: i16,
    int32: i32,
    float32: f32,
    float64: f64,
    slice: Vec<String>,
    slice_two: Vec<i32>,
    array: [String; 3],
    array_two: [i32; 2],
    interface: Dynamic,
    time: SystemTime,
    time_unix: SystemTime,
    args: Indexed<String>,
    foo: Simple,
}

impl Default for FullType {
    fn default() -> Self {
        Self {
            un_export: String::new(),
            un_export_two: String::new(),
            bool: false,
            bool_int: false,
            string: String::new(),
            string_empty: String::new(),
            string_empty_ignore: String::new(),
            uint: 0,
            uint64: 0,
            uint8: 0,
            uint16: 0,
            uint32: 0,
            int: 0,
            int64: 0,
            int8: 0,
            int16: 0,
            int32: 0,
            float32: 0.0,
            float64: 0.0,
            slice: Vec::new(),
            slice_two: Vec::new(),
            array: Default::default(),
            array_two: [0; 2],
            interface: Dynamic::Null,
            time: UNIX_EPOCH,
            time_unix: UNIX_EPOCH,
            args: Indexed::default(),
            foo: Simple::default(),
        }
    }
}

header_record! {
    FullType {
        #[private] un_export,
        un_export_two: "-",
        bool: "Bool",
        bool_int: "Bool-Int,int",
        string,
        string_empty: "String-Empty",
        string_empty_ignore: "String-Empty-Ignore,omitempty",
        uint,
        uint64,
        uint8,
        uint16,
        uint32,
        int,
        int64,
        int8,
        int16,
        int32,
        float32,
        float64,
        slice,
        slice_two: "Slice-Two",
        array,
        array_two: "Array-Two",
        interface,
        time,
        time_unix: "Time-Unix,unix",
        #[custom] args: "Arg",
        #[nested] foo,
    }
}

#[test]
fn every_field_kind() {
    let src = headers(&[
        ("UnExportTwo", "foo"),
        ("UnExport-Two", "foo"),
        ("un_export", "foo"),
        ("Bool", "true"),
        ("Bool-Int", "1"),
        ("String", "foobar"),
        ("String-Empty", ""),
        ("Uint", "2"),
        ("Uint64", "3"),
        ("Uint8", "4"),
        ("Uint16", "5"),
        ("Uint32", "6"),
        ("Int", "7"),
        ("Int64", "8"),
        ("Int8", "9"),
        ("Int16", "10"),
        ("Int32", "11"),
        ("Float32", "12.2"),
        ("Float64", "13.2"),
        ("Slice", "a"),
        ("Slice", "b"),
        ("Slice", "c"),
        ("Slice-Two", "1"),
        ("Slice-Two", "2"),
        ("Slice-Two", "3"),
        ("Array", "a"),
        ("Array", "b"),
        ("Array", "c"),
        ("Array-Two", "1"),
        ("Array-Two", "2"),
        ("Array-Two", "3"),
        ("Interface", "foo"),
        ("Interface", "bar"),
        ("Time", "Sat, 01 Jan 2000 12:34:56 GMT"),
        ("Time-Unix", "946730096"),
        ("Point", "foo"),
        ("Arg.0", "a"),
        ("Arg.1", "b"),
        ("Arg.2", "c"),
        ("Foo", "bar"),
    ]);

    let mut got = FullType::default();
    decode(&src, &mut got).unwrap();

    let want = FullType {
        bool: true,
        bool_int: true,
        string: "foobar".into(),
        uint: 2,
        uint64: 3,
        uint8: 4,
        uint16: 5,
        uint32: 6,
        int: 7,
        int64: 8,
        int8: 9,
        int16: 10,
        int32: 11,
        float32: 12.2,
        float64: 13.2,
        slice: vec!["a".into(), "b".into(), "c".into()],
        slice_two: vec![1, 2, 3],
        array: ["a".into(), "b".into(), "c".into()],
        array_two: [1, 2],
        interface: Dynamic::List(vec!["foo".into(), "bar".into()]),
        time: y2k(),
        time_unix: y2k(),
        args: Indexed(vec!["a".into(), "b".into(), "c".into()]),
        foo: Simple { foo: "bar".into(), bar: 0 },
        ..FullType::default()
    };
    assert_eq!(got, want);
}

#[test]
fn absent_headers_leave_fields_untouched() {
    let src = headers(&[("Length", "100")]);

    let mut got = FullType::default();
    decode(&src, &mut got).unwrap();
    assert_eq!(got, FullType::default());

    let mut preset = FullType { string: "kept".into(), slice: vec!["kept".into()], ..FullType::default() };
    decode(&src, &mut preset).unwrap();
    assert_eq!(preset.string, "kept");
    assert_eq!(preset.slice, ["kept"]);
}

#[derive(Debug, Default, PartialEq)]
struct Optionals {
    a: Option<String>,
    b: Option<Simple>,
    c: Option<i32>,
    d: Option<Indexed<String>>,
    f: Dynamic,
    g: Option<SystemTime>,
}

header_record! {
    Optionals {
        a,
        #[nested] b,
        c,
        #[custom] d: ",omitempty",
        f,
        g,
    }
}

#[test]
fn absent_headers_keep_optionals_empty() {
    let src = headers(&[("Length", "100")]);

    let mut got = Optionals::default();
    decode(&src, &mut got).unwrap();

    assert_eq!(got, Optionals::default());
    assert!(got.a.is_none() && got.b.is_none() && got.c.is_none() && got.d.is_none() && got.g.is_none());
}

#[test]
fn optionals_are_allocated_when_present() {
    let src = headers(&[("A", "foobar"), ("Bar", "3"), ("D", "series"), ("D.0", "x"), ("F", "single"), ("G", "Sat, 01 Jan 2000 12:34:56 GMT")]);

    let mut got = Optionals::default();
    decode(&src, &mut got).unwrap();

    assert_eq!(got.a.as_deref(), Some("foobar"));
    assert_eq!(got.b, Some(Simple { foo: String::new(), bar: 3 }));
    assert_eq!(got.c, None);
    assert_eq!(got.d, Some(Indexed(vec!["x".into()])));
    assert_eq!(got.f, Dynamic::Text("single".into()));
    assert_eq!(got.g, Some(y2k()));
}

#[test]
fn decoding_into_absent_record() {
    let src = headers(&[("Foo", "bar")]);

    let mut got: Option<Simple> = None;
    decode(&src, &mut got).unwrap();
    assert_eq!(got, Some(Simple { foo: "bar".into(), bar: 0 }));
}

#[test]
fn unparsable_integer() {
    let src = headers(&[("Int", "abc")]);

    let error = FullType::from_headers(&src).unwrap_err();

    assert!(matches!(
        error,
        Error::Format { ref field, ref value, source: ScalarError::InvalidInteger { .. }, .. } if field == "int" && value == "abc"
    ));
}

#[test]
fn every_kind_rejects_garbage() {
    for name in [
        "Uint", "Uint64", "Uint8", "Uint16", "Uint32", "Int", "Int64", "Int8", "Int16", "Int32", "Float32", "Float64", "Slice-Two", "Array-Two",
        "Time", "Time-Unix", "Bool", "Bool-Int",
    ] {
        let src = headers(&[(name, "a")]);
        let error = FullType::from_headers(&src).unwrap_err();
        assert!(matches!(error, Error::Format { .. }), "{name}: {error}");
    }
}

#[test]
fn first_error_stops_the_walk() {
    let src = headers(&[("Bool", "true"), ("Uint", "x"), ("Int", "5")]);

    let mut got = FullType::default();
    let error = decode(&src, &mut got).unwrap_err();

    assert!(matches!(error, Error::Format { ref field, .. } if field == "uint"));
    assert!(got.bool);
    assert_eq!(got.int, 0);
}

#[derive(Debug, Default, PartialEq)]
struct Bad {
    name: String,
}

header_record! {
    Bad {
        name: "Not A Header",
    }
}

#[test]
fn invalid_record_fails_every_call() {
    for _ in 0..2 {
        let error = Bad::from_headers(&HeaderMap::new()).unwrap_err();
        assert!(matches!(error, Error::InvalidRecord { .. }));
    }
}

#[derive(Debug, Default)]
struct Capture {
    trace: String,
    all: HeaderMap,
}

header_record! {
    Capture {
        trace: "X-Trace",
        all,
    }
}

#[test]
fn header_map_captures_everything() {
    let src = headers(&[("X-Trace", "t"), ("Accept", "a"), ("Accept", "b")]);

    let got = Capture::from_headers(&src).unwrap();

    assert_eq!(got.trace, "t");
    assert_eq!(got.all, src);
}

#[derive(Debug, Default, PartialEq)]
struct Pointer {
    point: Option<String>,
}

header_record! {
    Pointer {
        point: "Point",
    }
}

#[test]
fn pointer_is_allocated_only_when_present() {
    assert_eq!(Pointer::from_headers(&headers(&[("Length", "100")])).unwrap(), Pointer { point: None });
    assert_eq!(Pointer::from_headers(&headers(&[("Point", "foobar")])).unwrap(), Pointer { point: Some("foobar".into()) });
}

#[test]
fn empty_input_keeps_captured_map() {
    let mut preset = HeaderMap::new();
    preset.insert("accept", HeaderValue::from_static("kept"));
    let mut got = Capture { trace: "t".into(), all: preset.clone() };

    decode(&HeaderMap::new(), &mut got).unwrap();

    assert_eq!(got.trace, "t");
    assert_eq!(got.all, preset);
}

#[derive(Debug, Default, PartialEq)]
struct Endpoint {
    port: u16,
    scheme: String,
}

header_record! {
    Endpoint {
        port: "Port",
        scheme: "Scheme",
    }
}

#[derive(Debug, Default, PartialEq)]
struct Listener {
    endpoint: Endpoint,
    port: String,
    accept: String,
}

header_record! {
    Listener {
        #[embed] endpoint,
        port: "Port",
        accept: "Accept",
    }
}

#[test]
fn flattened_record_reads_the_parent_namespace() {
    let src = headers(&[("Port", "8080"), ("Scheme", "https"), ("Accept", "*/*")]);

    let got = Listener::from_headers(&src).unwrap();

    assert_eq!(
        got,
        Listener { endpoint: Endpoint { port: 8080, scheme: "https".into() }, port: "8080".into(), accept: "*/*".into() }
    );
}

#[test]
fn flattened_record_is_decoded_after_the_parent() {
    let src = headers(&[("Port", "http"), ("Scheme", "https"), ("Accept", "*/*")]);

    let mut got = Listener::default();
    let error = decode(&src, &mut got).unwrap_err();

    assert!(matches!(error, Error::Format { ref field, ref value, .. } if field == "port" && value == "http"));
    assert_eq!(got.port, "http");
    assert_eq!(got.accept, "*/*");
    assert_eq!(got.endpoint, Endpoint::default());
}

#[derive(Debug, Default, PartialEq)]
struct Series {
    args: Indexed<String>,
}

header_record! {
    Series {
        #[custom] args: "Arg",
    }
}

#[derive(Debug, Default, PartialEq)]
struct Holder {
    series: Option<Series>,
}

header_record! {
    Holder {
        #[nested] series,
    }
}

#[test]
fn optional_record_is_allocated_for_custom_codec_keys() {
    let got = Holder::from_headers(&headers(&[("Arg.0", "a"), ("Arg.1", "b")])).unwrap();
    assert_eq!(got, Holder { series: Some(Series { args: Indexed(vec!["a".into(), "b".into()]) }) });

    let got = Holder::from_headers(&headers(&[("Arg", "bare")])).unwrap();
    assert_eq!(got, Holder { series: None });
}
