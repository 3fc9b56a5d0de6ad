use secrecy::Secret;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub identity: IdentitySettings,
    pub openai: OpenAiSettings,
    pub media: MediaSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct CorsSettings {
    /// Browser origin allowed to call this service.
    pub allowed_origin: String,
}

#[derive(Deserialize, Clone)]
pub struct IdentitySettings {
    /// Base URL of the identity/profile provider.
    pub url: String,
    /// Service-role key used for token verification and profile reads.
    pub service_key: Secret<String>,
}

#[derive(Deserialize, Clone)]
pub struct OpenAiSettings {
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    pub api_key: Secret<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Deserialize, Clone)]
pub struct MediaSettings {
    #[serde(default = "default_media_base_url")]
    pub base_url: String,
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: Secret<String>,
    /// Folder namespace uploads land in on the media host.
    #[serde(default = "default_media_folder")]
    pub folder: String,
}

fn default_media_base_url() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

fn default_media_folder() -> String {
    "notes_images".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    // Check if we're already in analysis-service directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("analysis-service") {
        base_path.join("config")
    } else {
        base_path.join("analysis-service").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
