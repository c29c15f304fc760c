use super::{SmsError, SmsProvider};
use crate::config::TwilioConfig;
use async_trait::async_trait;
use std::time::Duration;

/// Sends messages through the Twilio REST API.
pub struct TwilioProvider {
    client: reqwest::Client,
    url: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

#[derive(serde::Deserialize)]
struct TwilioError {
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    message: String,
}

impl TwilioProvider {
    pub fn new(
        api_url: &str,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from: impl Into<String>,
    ) -> Result<Self, anyhow::Error> {
        let account_sid = account_sid.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            url: format!(
                "{}/2010-04-01/Accounts/{account_sid}/Messages.json",
                api_url.trim_end_matches('/')
            ),
            account_sid,
            auth_token: auth_token.into(),
            from: from.into(),
        })
    }

    /// Create a provider when the account, its token and a sender number are configured.
    pub fn from_config(config: &TwilioConfig) -> Result<Option<Self>, anyhow::Error> {
        match (&config.account_sid, &config.auth_token, &config.phone_number) {
            (Some(sid), Some(token), Some(from)) => Ok(Some(Self::new(
                &config.api_url,
                sid.clone(),
                token.clone(),
                from.clone(),
            )?)),
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl SmsProvider for TwilioProvider {
    async fn send(&self, to: &str, body: &str) -> Result<(), SmsError> {
        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from.as_str()), ("Body", body)])
            .send()
            .await
            .map_err(SmsError::Transport)?;

        let status = response.status();
        if status.is_success() {
            log::debug!("Twilio accepted message to {to}");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<TwilioError>(&text) {
            Ok(TwilioError {
                code: Some(code),
                message,
            }) => format!("{message} (code {code})"),
            Ok(TwilioError { message, .. }) if !message.is_empty() => message,
            _ => text,
        };

        Err(SmsError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{post, web, App, HttpResponse, HttpServer};
    use actix_web_httpauth::extractors::basic::BasicAuth;
    use std::collections::HashMap;
    use test_log::test;

    /// Mimics the messages endpoint, failing depending on the receiving number.
    #[post("/2010-04-01/Accounts/{sid}/Messages.json")]
    async fn messages(
        sid: web::Path<String>,
        auth: BasicAuth,
        web::Form(form): web::Form<HashMap<String, String>>,
    ) -> HttpResponse {
        if auth.user_id() != sid.as_str() || auth.password() != Some("token") {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({"code": 20003, "message": "Authenticate"}));
        }

        match form.get("To").map(String::as_str) {
            Some("+15005550001") => HttpResponse::BadRequest().json(serde_json::json!({
                "code": 21211,
                "message": "Invalid 'To' Phone Number"
            })),
            Some("+15005550002") => HttpResponse::ServiceUnavailable().body("try later"),
            Some(_) if form.get("From").map(String::as_str) == Some("+15005550006") => {
                HttpResponse::Created().json(serde_json::json!({"sid": "SM1", "status": "queued"}))
            }
            _ => HttpResponse::BadRequest().finish(),
        }
    }

    async fn start() -> anyhow::Result<String> {
        let server = HttpServer::new(|| App::new().service(messages))
            .workers(1)
            .bind(("127.0.0.1", 0))?;
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Ok(format!("http://{addr}"))
    }

    #[test(actix_web::test)]
    async fn send() -> anyhow::Result<()> {
        let url = start().await?;
        let provider = TwilioProvider::new(&url, "AC1", "token", "+15005550006")?;

        provider.send("+14155550100", "hello").await?;

        let err = provider
            .send("+15005550001", "hello")
            .await
            .expect_err("must be rejected");
        assert!(!err.retryable());
        assert_eq!(
            err.to_string(),
            "rejected by the provider (400): Invalid 'To' Phone Number (code 21211)"
        );

        let err = provider
            .send("+15005550002", "hello")
            .await
            .expect_err("must be rejected");
        assert!(err.retryable());

        let provider = TwilioProvider::new(&url, "AC1", "wrong", "+15005550006")?;
        let err = provider
            .send("+14155550100", "hello")
            .await
            .expect_err("must be rejected");
        assert!(matches!(err, SmsError::Rejected { status: 401, .. }));

        Ok(())
    }

    #[test(actix_web::test)]
    async fn unreachable() -> anyhow::Result<()> {
        // nothing listens on the discard port
        let provider = TwilioProvider::new("http://127.0.0.1:9", "AC1", "token", "+15005550006")?;
        let err = provider
            .send("+14155550100", "hello")
            .await
            .expect_err("must fail");
        assert!(matches!(err, SmsError::Transport(_)));
        assert!(err.retryable());

        Ok(())
    }

    #[test]
    fn incomplete_config() -> anyhow::Result<()> {
        let config = TwilioConfig {
            account_sid: Some("AC1".into()),
            auth_token: None,
            phone_number: Some("+15005550006".into()),
            api_url: "https://api.twilio.com".into(),
        };
        assert!(TwilioProvider::from_config(&config)?.is_none());
        Ok(())
    }
}
