#[derive(clap::Args, Debug, Clone)]
#[command(next_help_heading = "SMS (Twilio)")]
#[group(id = "twilio")]
pub struct TwilioConfig {
    /// Account SID, sending SMS is disabled without it
    #[arg(id = "twilio-account-sid", long, env = "TWILIO_ACCOUNT_SID")]
    pub account_sid: Option<String>,
    #[arg(id = "twilio-auth-token", long, env = "TWILIO_AUTH_TOKEN")]
    pub auth_token: Option<String>,
    /// The number messages are sent from
    #[arg(id = "twilio-phone-number", long, env = "TWILIO_PHONE_NUMBER")]
    pub phone_number: Option<String>,
    #[arg(
        id = "twilio-api-url",
        long,
        env = "TWILIO_API_URL",
        default_value = "https://api.twilio.com"
    )]
    pub api_url: String,
}
