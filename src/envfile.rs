use crate::config::InstallConfig;
use crate::secrets::SecretBundle;

/// Render the flat `.env` file consumed by the compose stack.
///
/// Every key the upstream definition reads is present on every
/// run, grouped by subsystem, whether or not that subsystem is
/// enabled. The file is rewritten whole each run, never merged.
/// Output is deterministic for a given config and bundle.
#[must_use]
pub fn render(config: &InstallConfig, secrets: &SecretBundle) -> String {
    let api_url = format!("http://{}:{}", config.site_host, config.gateway_port);
    let dashboard_url = format!("http://{}:{}", config.site_host, config.dashboard_port);

    let lines: Vec<String> = vec![
        "############".to_string(),
        "# Database".to_string(),
        "############".to_string(),
        "POSTGRES_HOST=db".to_string(),
        "POSTGRES_DB=postgres".to_string(),
        format!("POSTGRES_PORT={}", config.database_port),
        format!("POSTGRES_PASSWORD={}", secrets.postgres_password),
        String::new(),
        "############".to_string(),
        "# API gateway (Kong)".to_string(),
        "############".to_string(),
        format!("KONG_HTTP_PORT={}", config.gateway_port),
        "KONG_HTTPS_PORT=8443".to_string(),
        format!("API_EXTERNAL_URL={api_url}"),
        String::new(),
        "############".to_string(),
        "# Auth (GoTrue)".to_string(),
        "############".to_string(),
        format!("JWT_SECRET={}", secrets.jwt_secret),
        "JWT_EXPIRY=3600".to_string(),
        format!("ANON_KEY={}", secrets.anon_key),
        format!("SERVICE_ROLE_KEY={}", secrets.service_key),
        format!("SITE_URL={dashboard_url}"),
        "ADDITIONAL_REDIRECT_URLS=".to_string(),
        "DISABLE_SIGNUP=false".to_string(),
        "ENABLE_EMAIL_SIGNUP=true".to_string(),
        "ENABLE_EMAIL_AUTOCONFIRM=true".to_string(),
        "ENABLE_PHONE_SIGNUP=false".to_string(),
        "ENABLE_PHONE_AUTOCONFIRM=false".to_string(),
        String::new(),
        "############".to_string(),
        "# Dashboard (Studio)".to_string(),
        "############".to_string(),
        format!("STUDIO_PORT={}", config.dashboard_port),
        "STUDIO_DEFAULT_ORGANIZATION=Default Organization".to_string(),
        "STUDIO_DEFAULT_PROJECT=Default Project".to_string(),
        format!("SUPABASE_PUBLIC_URL={api_url}"),
        String::new(),
        "############".to_string(),
        "# Mail testing (Inbucket)".to_string(),
        "############".to_string(),
        format!("SMTP_ADMIN_EMAIL=admin@{}", config.site_host),
        "SMTP_HOST=inbucket".to_string(),
        "SMTP_PORT=2500".to_string(),
        "SMTP_USER=fake_mail_user".to_string(),
        "SMTP_PASS=fake_mail_password".to_string(),
        "SMTP_SENDER_NAME=basestack".to_string(),
        String::new(),
        "############".to_string(),
        "# Storage".to_string(),
        "############".to_string(),
        "STORAGE_BACKEND=file".to_string(),
        "FILE_SIZE_LIMIT=52428800".to_string(),
        "IMGPROXY_ENABLE_WEBP_DETECTION=true".to_string(),
        String::new(),
        "############".to_string(),
        "# Analytics (disabled, keys kept for the base definition)".to_string(),
        "############".to_string(),
        "ANALYTICS_ENABLED=false".to_string(),
        "LOGFLARE_API_KEY=".to_string(),
        "DOCKER_SOCKET_LOCATION=/var/run/docker.sock".to_string(),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
