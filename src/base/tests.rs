use crate::base::profileerror::ProfileError;
use crate::profile::scheme::Scheme;

#[test]
fn test_missing_server_names_scheme() {
    let err = ProfileError::MissingServer(Scheme::Https);
    assert_eq!(err.to_string(), "Proxy server required for https");
    assert!(!err.is_input_error());
}

#[test]
fn test_input_errors() {
    assert!(ProfileError::InvalidPort("-1".into()).is_input_error());
    let unknown = ProfileError::UnknownProtocol("gopher".into());
    assert!(unknown.is_input_error());
    assert!(!ProfileError::Template("eof".into()).is_input_error());
}

#[test]
fn test_url_parse_error_conversion() {
    let err: ProfileError = url::Url::parse("http://[::1").unwrap_err().into();
    assert!(matches!(err, ProfileError::InvalidProxyUrl(_)));
}
