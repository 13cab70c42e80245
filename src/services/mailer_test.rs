use super::*;

fn sample_email() -> Email {
    Email {
        from_name: "KİMTAŞSİGORTA Form".into(),
        to: "teklif@example.com".into(),
        subject: "Yeni teklif talebi - DASK".into(),
        text: "Ad Soyad: Ayse Demir\nTelefon: 5123456789".into(),
    }
}

#[test]
fn build_message_sets_envelope() {
    let from: Address = "form@example.com".parse().unwrap();
    let message = build_message(&from, &sample_email()).unwrap();

    let envelope = message.envelope();
    assert_eq!(envelope.from().map(ToString::to_string).as_deref(), Some("form@example.com"));
    let to: Vec<String> = envelope.to().iter().map(ToString::to_string).collect();
    assert_eq!(to, ["teklif@example.com"]);
}

#[test]
fn build_message_carries_plain_text_body() {
    let from: Address = "form@example.com".parse().unwrap();
    let raw = String::from_utf8(build_message(&from, &sample_email()).unwrap().formatted()).unwrap();
    assert!(raw.contains("text/plain"));
    assert!(raw.contains("Ad Soyad: Ayse Demir"));
}

#[test]
fn build_message_rejects_bad_recipient() {
    let from: Address = "form@example.com".parse().unwrap();
    let email = Email { to: "not an address".into(), ..sample_email() };
    assert!(matches!(build_message(&from, &email), Err(MailError::InvalidAddress(_))));
}

#[test]
fn from_settings_requires_both_credentials() {
    let settings = SmtpSettings { user: Some("form@example.com".into()), ..SmtpSettings::default() };
    assert!(matches!(SmtpMailer::from_settings(&settings), Err(MailError::MissingCredentials)));
}

#[test]
fn from_settings_rejects_non_address_user() {
    let settings = SmtpSettings {
        user: Some("form".into()),
        pass: Some("secret".into()),
        ..SmtpSettings::default()
    };
    assert!(matches!(SmtpMailer::from_settings(&settings), Err(MailError::InvalidAddress(_))));
}

#[tokio::test]
async fn from_settings_builds_without_connecting() {
    let settings = SmtpSettings {
        user: Some("form@example.com".into()),
        pass: Some("secret".into()),
        ..SmtpSettings::default()
    };
    assert!(SmtpMailer::from_settings(&settings).is_ok());
}
