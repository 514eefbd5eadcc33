use micro_header::{DecodeHeader, EncodeHeader, Error, HeaderMap, HeaderName, HeaderValue, Indexed, Record, decode, encode, header_record};
use mockall::mock;
use mockall::predicate::always;

mock! {
    pub Codec {}

    impl EncodeHeader for Codec {
        fn encode_header(&self, name: &HeaderName, headers: &mut HeaderMap) -> Result<(), Error>;
        fn is_empty_header(&self) -> bool;
    }

    impl DecodeHeader for Codec {
        fn decode_header(&mut self, headers: &HeaderMap, name: &HeaderName) -> Result<(), Error>;
    }
}

#[derive(Default)]
struct Signed {
    id: String,
    signature: MockCodec,
}

header_record! {
    Signed {
        id: "X-Id",
        #[custom] signature: "X-Signature",
    }
}

#[derive(Default)]
struct Optional {
    signature: MockCodec,
}

header_record! {
    Optional {
        #[custom] signature: "X-Signature,omitempty",
    }
}

#[derive(Default)]
struct WriteOnly {
    signature: MockCodec,
}

header_record! {
    WriteOnly {
        #[encoder] signature: "X-Signature",
    }
}

#[test]
fn encoder_receives_resolved_name() {
    let mut signed = Signed { id: "1".into(), ..Signed::default() };
    signed
        .signature
        .expect_encode_header()
        .withf(|name, headers| name.as_str() == "x-signature" && headers.contains_key("x-id"))
        .times(1)
        .returning(|name, headers| {
            headers.append(HeaderName::try_from(format!("{name}-alg")).unwrap(), HeaderValue::from_static("hmac"));
            headers.append(name.clone(), HeaderValue::from_static("c2ln"));
            Ok(())
        });

    let headers = encode(&signed).unwrap();

    assert_eq!(headers["x-id"], "1");
    assert_eq!(headers["x-signature"], "c2ln");
    assert_eq!(headers["x-signature-alg"], "hmac");
}

#[test]
fn decoder_sees_the_whole_map() {
    let mut src = HeaderMap::new();
    src.insert("x-id", HeaderValue::from_static("1"));
    src.insert("x-signature", HeaderValue::from_static("c2ln"));

    let mut signed = Signed::default();
    signed
        .signature
        .expect_decode_header()
        .withf(|headers, name| name.as_str() == "x-signature" && headers.len() == 2)
        .times(1)
        .returning(|_, _| Ok(()));

    decode(&src, &mut signed).unwrap();
    assert_eq!(signed.id, "1");
}

#[test]
fn codec_errors_propagate_unchanged() {
    let mut signed = Signed::default();
    signed.signature.expect_encode_header().with(always(), always()).returning(|_, _| Err(Error::custom("bad key")));

    let error = encode(&signed).unwrap_err();

    assert!(matches!(error, Error::Custom(_)));
    assert_eq!(error.to_string(), "bad key");
}

#[test]
fn omit_empty_asks_the_codec() {
    let mut optional = Optional::default();
    optional.signature.expect_is_empty_header().times(1).return_const(true);
    optional.signature.expect_encode_header().never();

    let headers = optional.to_headers().unwrap();
    assert!(headers.is_empty());
}

#[test]
fn omit_empty_skips_absent_header_on_decode() {
    let mut optional = Optional::default();
    optional.signature.expect_decode_header().never();

    let mut src = HeaderMap::new();
    src.insert("x-signature", HeaderValue::from_static(""));
    decode(&src, &mut optional).unwrap();
}

#[test]
fn encode_only_codec_is_ignored_on_decode() {
    let mut write_only = WriteOnly::default();
    write_only.signature.expect_decode_header().never();

    let mut src = HeaderMap::new();
    src.insert("x-signature", HeaderValue::from_static("c2ln"));
    decode(&src, &mut write_only).unwrap();
}

#[derive(Debug, Default, PartialEq)]
struct Command {
    name: String,
    args: Indexed<String>,
    ports: Option<Indexed<u16>>,
}

header_record! {
    Command {
        name: "Cmd",
        #[custom] args: "Arg",
        #[custom] ports: "Port",
    }
}

#[test]
fn indexed_series() {
    let command = Command { name: "run".into(), args: Indexed(vec!["a".into(), "b".into(), "c".into()]), ports: None };

    let headers = encode(&command).unwrap();

    assert_eq!(headers["arg.0"], "a");
    assert_eq!(headers["arg.1"], "b");
    assert_eq!(headers["arg.2"], "c");
    assert!(!headers.contains_key("port.0"));

    let decoded = Command::from_headers(&headers).unwrap();
    assert_eq!(decoded, Command { ports: Some(Indexed::default()), ..command });
}

#[test]
fn indexed_series_from_unordered_keys() {
    let mut src = HeaderMap::new();
    src.insert("Arg.2", HeaderValue::from_static("c"));
    src.insert("Arg.0", HeaderValue::from_static("a"));
    src.insert("Arg.1", HeaderValue::from_static("b"));
    src.insert("Port.0", HeaderValue::from_static("8080"));

    let command = Command::from_headers(&src).unwrap();

    assert_eq!(command.args.into_inner(), ["a", "b", "c"]);
    assert_eq!(command.ports, Some(Indexed(vec![8080])));
}
