//! Reference of the backend API a real deployment would need.
//!
//! Nothing here is served; `/api` prints it so the mocked workspace can be
//! swapped for a server later.

use serde::Serialize;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// One REST endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub group: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub description: &'static str,
}

/// Which side emits a websocket event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventDirection {
    ClientToServer,
    ServerToClient,
}

/// One websocket event.
#[derive(Debug, Clone, Serialize)]
pub struct SocketEvent {
    pub name: &'static str,
    pub direction: EventDirection,
    pub description: &'static str,
}

/// The whole reference.
#[derive(Debug, Clone, Serialize)]
pub struct ApiReference {
    pub auth_header: &'static str,
    pub error_format: &'static str,
    pub endpoints: Vec<Endpoint>,
    pub socket_url: &'static str,
    pub events: Vec<SocketEvent>,
}

pub fn api_reference() -> ApiReference {
    use HttpMethod::*;

    let endpoint = |group: &'static str,
                    method: HttpMethod,
                    path: &'static str,
                    description: &'static str| Endpoint {
        group,
        method,
        path,
        description,
    };
    let event = |name: &'static str, direction: EventDirection, description: &'static str| {
        SocketEvent {
            name,
            direction,
            description,
        }
    };

    ApiReference {
        auth_header: "Authorization: Bearer <JWT_TOKEN>",
        error_format: r#"{ "error": { "code": "UNIQUE_ERROR_CODE", "message": "A human-readable error message." } }"#,
        endpoints: vec![
            endpoint("Authentication", Post, "/api/auth/login", "Authenticates with username & password; returns JWT and User (401 on bad credentials)."),
            endpoint("Authentication", Post, "/api/auth/guest", "Logs in as a guest with a username; returns JWT and User."),
            endpoint("Authentication", Post, "/api/auth/logout", "Logs out the user and invalidates the token (204)."),
            endpoint("Users", Get, "/api/users/me", "Gets the profile of the current user."),
            endpoint("Users", Patch, "/api/users/me", "Updates the current user's profile (400 on invalid input)."),
            endpoint("Servers & Channels", Get, "/api/servers", "Gets the servers the user is in."),
            endpoint("Servers & Channels", Post, "/api/servers", "Creates a new server."),
            endpoint("Servers & Channels", Get, "/api/servers/:serverId/channels", "Gets the channels of a server (404 unknown server, 403 not a member)."),
            endpoint("Servers & Channels", Post, "/api/servers/:serverId/channels", "Creates a channel in a server (404 unknown server, 403 not a member)."),
            endpoint("Messages", Get, "/api/channels/:channelId/messages", "Gets message history; paginated with ?limit=50&cursor=MSG_ID."),
        ],
        socket_url: "ws://your-domain/ws?token=JWT_TOKEN",
        events: vec![
            event("SEND_MESSAGE", EventDirection::ClientToServer, "User sends a message: { channelId, content }."),
            event("START_TYPING", EventDirection::ClientToServer, "User starts typing: { channelId }."),
            event("NEW_MESSAGE", EventDirection::ServerToClient, "A full Message broadcast to the channel."),
            event("CHANNEL_CREATED", EventDirection::ServerToClient, "A full Channel object."),
            event("USER_TYPING", EventDirection::ServerToClient, "Who is typing: { channelId, user }."),
            event("ERROR", EventDirection::ServerToClient, "Standard error object sent to one client."),
        ],
    }
}
