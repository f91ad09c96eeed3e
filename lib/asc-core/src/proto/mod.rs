pub mod api_client;
pub mod bearer_token;
pub mod certificate_material;
pub mod clock;
pub mod http_client;
pub mod jwt;
