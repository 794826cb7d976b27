//! API commands and the `{"request": ...}` envelope.
//!
//! A command owns its field state and compiles it into a fresh envelope on
//! every call. Required fields are checked at compile time, so they can be
//! set in any order before the command is sent.

use pushwoosh_filter::{ApplicationScope, Platform};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, error};

use crate::aspect::{Aspect, Fields, compose, to_fields};
use crate::notification::{CommonFields, MessageFields, Notification};
use crate::platform::PlatformFields;
use crate::selection::{DevicesFilter, DevicesFilterField};
use crate::{PushError, Result};

/// Kind of API command. Each kind posts to its own route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Send messages to an application or application group.
    CreateMessage,
    /// Send a message to a filtered audience.
    CreateTargetedMessage,
    /// Check a filter expression.
    CompileFilter,
    /// Cancel a scheduled message.
    DeleteMessage,
    /// Register a device push token.
    RegisterDevice,
    /// Remove a device.
    UnregisterDevice,
    /// Set device tags.
    SetTags,
    /// Report the device badge value.
    SetBadge,
    /// Record an opened push.
    PushStat,
    /// Report the device location.
    GetNearestZone,
}

impl CommandKind {
    /// Route segment appended to `/<endpoint>/<version>/`.
    pub fn route(&self) -> &'static str {
        match self {
            CommandKind::CreateMessage => "createMessage",
            CommandKind::CreateTargetedMessage => "createTargetedMessage",
            CommandKind::CompileFilter => "compileFilter",
            CommandKind::DeleteMessage => "deleteMessage",
            CommandKind::RegisterDevice => "registerDevice",
            CommandKind::UnregisterDevice => "unregisterDevice",
            CommandKind::SetTags => "setTags",
            CommandKind::SetBadge => "setBadge",
            CommandKind::PushStat => "pushStat",
            CommandKind::GetNearestZone => "getNearestZone",
        }
    }

    /// Whether the command carries an API access token.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            CommandKind::CreateMessage
                | CommandKind::CreateTargetedMessage
                | CommandKind::CompileFilter
                | CommandKind::DeleteMessage
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

/// A request to the remote API.
pub trait Command: Send + Sync {
    /// Command kind.
    fn kind(&self) -> CommandKind;

    /// Validate the current field state and build `{"request": {...}}`.
    fn compile(&self) -> Result<Value>;

    /// Compile and serialize to JSON text.
    fn render(&self) -> Result<String> {
        let envelope = self.compile()?;
        serde_json::to_string(&envelope).map_err(|e| {
            error!(command = %self.kind(), error = %e, "Failed to encode command");
            PushError::from(e)
        })
    }
}

/// Wrap compiled fields in the request envelope.
fn envelope(kind: CommandKind, fields: Fields) -> Value {
    debug!(command = %kind, fields = fields.len(), "Compiled command");
    let mut request = Map::new();
    request.insert("request".to_string(), Value::Object(fields));
    Value::Object(request)
}

fn require_auth(auth: Option<&str>) -> Result<&str> {
    auth.ok_or(PushError::MissingField("auth"))
}

/// `createMessage` for one application or one application group.
///
/// ```
/// use pushwoosh_push::{Command, CreateMessageCommand, MessageFields, Notification};
///
/// let command = CreateMessageCommand::for_application([Notification::new().content("Hello world!")])
///     .application("0000-0000")
///     .auth("t");
///
/// assert_eq!(
///     command.compile()?,
///     serde_json::json!({"request": {
///         "application": "0000-0000",
///         "auth": "t",
///         "notifications": [{"content": "Hello world!", "send_date": "now"}],
///     }})
/// );
/// # Ok::<(), pushwoosh_push::PushError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CreateMessageCommand {
    /// API access token.
    pub auth: Option<String>,
    scope: ApplicationScope,
    /// Application code, required for application-scoped commands.
    pub application: Option<String>,
    /// Application group code, required for group-scoped commands.
    pub application_group: Option<String>,
    /// Messages to create.
    pub notifications: Vec<Notification>,
}

impl CreateMessageCommand {
    /// Create a command addressed to a single application.
    pub fn for_application(notifications: impl IntoIterator<Item = Notification>) -> Self {
        Self::new(ApplicationScope::Application, notifications)
    }

    /// Create a command addressed to an application group.
    pub fn for_application_group(notifications: impl IntoIterator<Item = Notification>) -> Self {
        Self::new(ApplicationScope::Group, notifications)
    }

    fn new(scope: ApplicationScope, notifications: impl IntoIterator<Item = Notification>) -> Self {
        Self {
            auth: None,
            scope,
            application: None,
            application_group: None,
            notifications: notifications.into_iter().collect(),
        }
    }

    /// Set the API access token.
    pub fn auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Set the application code.
    ///
    /// Only valid on commands created with [`for_application`](Self::for_application).
    pub fn application(mut self, code: impl Into<String>) -> Self {
        self.application = Some(code.into());
        self
    }

    /// Set the application group code.
    ///
    /// Only valid on commands created with
    /// [`for_application_group`](Self::for_application_group).
    pub fn application_group(mut self, code: impl Into<String>) -> Self {
        self.application_group = Some(code.into());
        self
    }

    /// Append a notification.
    pub fn notification(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    /// Recipient scope.
    pub fn scope(&self) -> ApplicationScope {
        self.scope
    }

    /// Recipient code for the command's scope.
    ///
    /// The code of the other scope must be unset.
    fn recipient(&self) -> Result<(&'static str, &str)> {
        let (field, code, other) = match self.scope {
            ApplicationScope::Application => {
                ("application", &self.application, &self.application_group)
            }
            ApplicationScope::Group => {
                ("applications_group", &self.application_group, &self.application)
            }
        };

        if other.is_some() {
            return Err(PushError::MutuallyExclusive {
                first: "application",
                second: "applications_group",
            });
        }

        let code = code.as_deref().ok_or(PushError::MissingField(field))?;
        Ok((field, code))
    }
}

impl Command for CreateMessageCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::CreateMessage
    }

    fn compile(&self) -> Result<Value> {
        let auth = require_auth(self.auth.as_deref())?;

        let (recipient, code) = self.recipient()?;

        if self.notifications.is_empty() {
            return Err(PushError::MissingField("notifications"));
        }
        let notifications = self
            .notifications
            .iter()
            .map(|n| n.render().map(Value::Object))
            .collect::<Result<Vec<_>>>()?;

        let mut fields = Fields::new();
        fields.insert(recipient.to_string(), Value::String(code.to_string()));
        fields.insert("auth".to_string(), Value::String(auth.to_string()));
        fields.insert("notifications".to_string(), Value::Array(notifications));

        Ok(envelope(self.kind(), fields))
    }
}

/// `createTargetedMessage`: a message whose audience is a filter expression.
///
/// Carries the common aspect, the nine platform aspects and a required
/// `devices_filter`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTargetedMessageCommand {
    /// API access token.
    pub auth: Option<String>,
    /// Fields shared by every message.
    pub common: CommonFields,
    /// Per-platform fields.
    pub platform: PlatformFields,
    /// Audience expression.
    pub devices_filter: DevicesFilterField,
}

impl CreateTargetedMessageCommand {
    /// Create an empty command. Auth and audience are set later.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API access token.
    pub fn auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Set the audience.
    pub fn devices_filter(mut self, filter: impl Into<DevicesFilter>) -> Self {
        self.devices_filter.devices_filter = Some(filter.into());
        self
    }

    fn aspects(&self) -> Vec<&dyn Aspect> {
        let mut aspects: Vec<&dyn Aspect> = Vec::with_capacity(11);
        aspects.push(&self.common);
        aspects.extend(self.platform.aspects());
        aspects.push(&self.devices_filter);
        aspects
    }
}

impl MessageFields for CreateTargetedMessageCommand {
    fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }

    fn platform_mut(&mut self) -> &mut PlatformFields {
        &mut self.platform
    }
}

impl Command for CreateTargetedMessageCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::CreateTargetedMessage
    }

    fn compile(&self) -> Result<Value> {
        let auth = require_auth(self.auth.as_deref())?;

        let mut fields = compose(&self.aspects())?;
        fields.insert("auth".to_string(), Value::String(auth.to_string()));

        Ok(envelope(self.kind(), fields))
    }
}

/// `compileFilter`: dry-run a filter expression on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileFilterCommand {
    /// API access token.
    pub auth: Option<String>,
    /// Filter to compile.
    pub devices_filter: DevicesFilterField,
}

impl CompileFilterCommand {
    /// Create an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API access token.
    pub fn auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Set the filter to compile.
    pub fn devices_filter(mut self, filter: impl Into<DevicesFilter>) -> Self {
        self.devices_filter.devices_filter = Some(filter.into());
        self
    }
}

impl Command for CompileFilterCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::CompileFilter
    }

    fn compile(&self) -> Result<Value> {
        let auth = require_auth(self.auth.as_deref())?;

        let mut fields = compose(&[&self.devices_filter])?;
        fields.insert("auth".to_string(), Value::String(auth.to_string()));

        Ok(envelope(self.kind(), fields))
    }
}

/// `deleteMessage`: cancel a scheduled message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteMessageCommand {
    /// API access token.
    pub auth: Option<String>,
    /// Message code returned by `createMessage`.
    pub message: Option<String>,
}

impl DeleteMessageCommand {
    /// Create an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API access token.
    pub fn auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    /// Set the message code.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Command for DeleteMessageCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::DeleteMessage
    }

    fn compile(&self) -> Result<Value> {
        let auth = require_auth(self.auth.as_deref())?;
        let message = self
            .message
            .as_ref()
            .ok_or(PushError::MissingField("message"))?;

        let mut fields = Fields::new();
        fields.insert("auth".to_string(), Value::String(auth.to_string()));
        fields.insert("message".to_string(), Value::String(message.clone()));

        Ok(envelope(self.kind(), fields))
    }
}

/// Application and hardware id every device command is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceTarget {
    /// Application code.
    pub application: String,
    /// Unique device identifier.
    pub hwid: String,
}

impl DeviceTarget {
    /// Address a device of an application.
    pub fn new(application: impl Into<String>, hwid: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            hwid: hwid.into(),
        }
    }
}

macro_rules! device_command {
    ($ty:ty, $kind:ident) => {
        impl Command for $ty {
            fn kind(&self) -> CommandKind {
                CommandKind::$kind
            }

            fn compile(&self) -> Result<Value> {
                Ok(envelope(self.kind(), to_fields(self)?))
            }
        }
    };
}

/// `registerDevice`: register a push token for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterDeviceCommand {
    /// Device the command is about.
    #[serde(flatten)]
    pub target: DeviceTarget,
    /// Device platform, sent as its numeric code.
    pub device_type: Platform,
    /// Token issued by the platform push service.
    pub push_token: String,
    /// Device locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Time zone offset in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i32>,
}

impl RegisterDeviceCommand {
    /// Register `push_token` for a device.
    pub fn new(
        application: impl Into<String>,
        hwid: impl Into<String>,
        device_type: Platform,
        push_token: impl Into<String>,
    ) -> Self {
        Self {
            target: DeviceTarget::new(application, hwid),
            device_type,
            push_token: push_token.into(),
            language: None,
            timezone: None,
        }
    }

    /// Set the device locale, e.g. `en`.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the time zone offset from UTC in seconds.
    pub fn timezone(mut self, offset_secs: i32) -> Self {
        self.timezone = Some(offset_secs);
        self
    }
}

device_command!(RegisterDeviceCommand, RegisterDevice);

/// `unregisterDevice`: remove a device from an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnregisterDeviceCommand {
    /// Device the command is about.
    #[serde(flatten)]
    pub target: DeviceTarget,
}

impl UnregisterDeviceCommand {
    /// Unregister a device.
    pub fn new(application: impl Into<String>, hwid: impl Into<String>) -> Self {
        Self {
            target: DeviceTarget::new(application, hwid),
        }
    }
}

device_command!(UnregisterDeviceCommand, UnregisterDevice);

/// `setTags`: set tag values on a device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetTagsCommand {
    /// Device the command is about.
    #[serde(flatten)]
    pub target: DeviceTarget,
    /// Tag names and values.
    pub tags: Map<String, Value>,
}

impl SetTagsCommand {
    /// Create a command with no tags.
    pub fn new(application: impl Into<String>, hwid: impl Into<String>) -> Self {
        Self {
            target: DeviceTarget::new(application, hwid),
            tags: Map::new(),
        }
    }

    /// Set one tag value.
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }
}

device_command!(SetTagsCommand, SetTags);

/// `setBadge`: report the current badge so auto-incrementing badges work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetBadgeCommand {
    /// Device the command is about.
    #[serde(flatten)]
    pub target: DeviceTarget,
    /// Current badge value.
    pub badges: i64,
}

impl SetBadgeCommand {
    /// Report the badge value shown on a device.
    pub fn new(application: impl Into<String>, hwid: impl Into<String>, badges: i64) -> Self {
        Self {
            target: DeviceTarget::new(application, hwid),
            badges,
        }
    }
}

device_command!(SetBadgeCommand, SetBadge);

/// `pushStat`: record that a push was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushStatCommand {
    /// Device the command is about.
    #[serde(flatten)]
    pub target: DeviceTarget,
    /// Hash received with the push.
    pub hash: String,
}

impl PushStatCommand {
    /// Record an opened push.
    pub fn new(application: impl Into<String>, hwid: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            target: DeviceTarget::new(application, hwid),
            hash: hash.into(),
        }
    }
}

device_command!(PushStatCommand, PushStat);

/// `getNearestZone`: record device location for geo pushes.
///
/// Coordinates must be finite; JSON has no encoding for NaN or infinity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetNearestZoneCommand {
    /// Device the command is about.
    #[serde(flatten)]
    pub target: DeviceTarget,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GetNearestZoneCommand {
    /// Create a location report for a device.
    pub fn new(application: impl Into<String>, hwid: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            target: DeviceTarget::new(application, hwid),
            lat,
            lng,
        }
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PushError::InvalidField {
            field,
            reason: format!("{value} is not a finite coordinate"),
        })
    }
}

impl Command for GetNearestZoneCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::GetNearestZone
    }

    fn compile(&self) -> Result<Value> {
        require_finite("lat", self.lat)?;
        require_finite("lng", self.lng)?;

        Ok(envelope(self.kind(), to_fields(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::IosFields;
    use pushwoosh_filter::{ApplicationFilter, Operator, SetOps, TagFilter};
    use serde_json::json;

    const AUTH: &str = "test_auth";
    const CODE: &str = "0000-0000";
    const HWID: &str = "hwid-1";

    fn hello() -> Notification {
        Notification::new().content("Hello world!")
    }

    fn rendered(command: &dyn Command) -> Value {
        serde_json::from_str(&command.render().unwrap()).unwrap()
    }

    #[test]
    fn test_routes() {
        assert_eq!(CommandKind::CreateMessage.route(), "createMessage");
        assert_eq!(CommandKind::GetNearestZone.to_string(), "getNearestZone");
        assert!(CommandKind::CompileFilter.requires_auth());
        assert!(!CommandKind::SetTags.requires_auth());
    }

    #[test]
    fn test_create_by_application() {
        let command = CreateMessageCommand::for_application([hello()])
            .application(CODE)
            .auth(AUTH);

        assert_eq!(
            rendered(&command),
            json!({"request": {
                "application": CODE,
                "auth": AUTH,
                "notifications": [{"content": "Hello world!", "send_date": "now"}],
            }})
        );
    }

    #[test]
    fn test_create_by_application_group() {
        let command = CreateMessageCommand::for_application_group([hello()])
            .application_group(CODE)
            .auth(AUTH);

        assert_eq!(
            rendered(&command),
            json!({"request": {
                "applications_group": CODE,
                "auth": AUTH,
                "notifications": [{"content": "Hello world!", "send_date": "now"}],
            }})
        );
    }

    #[test]
    fn test_create_by_user() {
        let command = CreateMessageCommand::for_application([hello().users(["user_1", "user_2"])])
            .application(CODE)
            .auth(AUTH);

        assert_eq!(
            rendered(&command)["request"]["notifications"][0]["users"],
            json!(["user_1", "user_2"])
        );
    }

    #[test]
    fn test_create_without_recipient() {
        let command = CreateMessageCommand::for_application([hello()]).auth(AUTH);
        assert_eq!(command.compile().unwrap_err().missing_field(), Some("application"));

        let command = CreateMessageCommand::for_application_group([hello()]).auth(AUTH);
        assert_eq!(
            command.compile().unwrap_err().missing_field(),
            Some("applications_group")
        );
    }

    #[test]
    fn test_recipient_of_other_scope_is_rejected() {
        let command = CreateMessageCommand::for_application([hello()])
            .application_group("GROUP-CODE")
            .auth(AUTH);
        assert!(matches!(
            command.compile(),
            Err(PushError::MutuallyExclusive {
                first: "application",
                second: "applications_group"
            })
        ));

        let command = CreateMessageCommand::for_application_group([hello()])
            .application(CODE)
            .auth(AUTH);
        assert!(matches!(command.compile(), Err(PushError::MutuallyExclusive { .. })));

        let command = CreateMessageCommand::for_application([hello()])
            .application(CODE)
            .application_group("GROUP-CODE")
            .auth(AUTH);
        assert!(command.compile().is_err());
    }

    #[test]
    fn test_recipients_are_stored_separately() {
        let command = CreateMessageCommand::for_application_group([hello()])
            .application_group("GROUP-CODE")
            .auth(AUTH);

        assert_eq!(command.application, None);
        let request = &rendered(&command)["request"];
        assert_eq!(request["applications_group"], "GROUP-CODE");
        assert!(request.get("application").is_none());
    }

    #[test]
    fn test_auth_is_checked_first() {
        let command = CreateMessageCommand::for_application(Vec::new());
        assert_eq!(command.compile().unwrap_err().missing_field(), Some("auth"));
    }

    #[test]
    fn test_create_without_notifications() {
        let command = CreateMessageCommand::for_application(Vec::new())
            .application(CODE)
            .auth(AUTH);
        assert_eq!(command.compile().unwrap_err().missing_field(), Some("notifications"));
    }

    #[test]
    fn test_invalid_notification_fails_command() {
        let notification = hello()
            .filter("Segment")
            .condition(crate::Condition::new("Level", Operator::Eq, 1).unwrap());
        let command = CreateMessageCommand::for_application([notification])
            .application(CODE)
            .auth(AUTH);

        assert!(matches!(command.compile(), Err(PushError::MutuallyExclusive { .. })));
    }

    #[test]
    fn test_targeted_message() {
        let command = CreateTargetedMessageCommand::new()
            .auth(AUTH)
            .content("Hello world!")
            .devices_filter(ApplicationFilter::application(CODE));

        assert_eq!(
            rendered(&command),
            json!({"request": {
                "devices_filter": format!("A(\"{CODE}\")"),
                "auth": AUTH,
                "content": "Hello world!",
                "send_date": "now",
            }})
        );
    }

    #[test]
    fn test_targeted_message_with_platform_fields() {
        let filter = ApplicationFilter::application(CODE)
            .intersect(TagFilter::integer("Level", Operator::Gte, 3).unwrap());
        let command = CreateTargetedMessageCommand::new()
            .auth(AUTH)
            .content("Level up")
            .ios(IosFields {
                sound: Some("chime.caf".into()),
                ..Default::default()
            })
            .devices_filter(filter);

        let request = &rendered(&command)["request"];
        assert_eq!(request["ios_sound"], "chime.caf");
        assert_eq!(
            request["devices_filter"],
            format!("(A(\"{CODE}\") * T(\"Level\", GTE, 3))")
        );
    }

    #[test]
    fn test_targeted_message_without_devices_filter() {
        let command = CreateTargetedMessageCommand::new().auth(AUTH).content("x");
        assert_eq!(command.compile().unwrap_err().missing_field(), Some("devices_filter"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let command = CreateTargetedMessageCommand::new()
            .auth(AUTH)
            .content("Hello")
            .devices_filter(ApplicationFilter::application(CODE));

        let first = command.render().unwrap();
        let second = command.render().unwrap();
        assert_eq!(first, second);
        assert!(rendered(&command)["request"].get("request").is_none());
    }

    #[test]
    fn test_compile_filter() {
        let command = CompileFilterCommand::new()
            .auth(AUTH)
            .devices_filter(ApplicationFilter::application(CODE));

        assert_eq!(
            rendered(&command),
            json!({"request": {"devices_filter": format!("A(\"{CODE}\")"), "auth": AUTH}})
        );
    }

    #[test]
    fn test_compile_filter_without_auth() {
        let command = CompileFilterCommand::new().devices_filter(ApplicationFilter::application(CODE));
        assert_eq!(command.render().unwrap_err().missing_field(), Some("auth"));
    }

    #[test]
    fn test_delete_message() {
        let command = DeleteMessageCommand::new().auth("Test auth").message("message_code");
        assert_eq!(
            rendered(&command),
            json!({"request": {"message": "message_code", "auth": "Test auth"}})
        );

        let err = DeleteMessageCommand::new().auth(AUTH).compile().unwrap_err();
        assert_eq!(err.missing_field(), Some("message"));
    }

    #[test]
    fn test_register_device() {
        let command = RegisterDeviceCommand::new(CODE, HWID, Platform::Android, "token");
        assert_eq!(
            rendered(&command),
            json!({"request": {
                "application": CODE,
                "hwid": HWID,
                "device_type": 3,
                "push_token": "token",
            }})
        );

        let command = command.language("en").timezone(3600);
        let request = &rendered(&command)["request"];
        assert_eq!(request["language"], "en");
        assert_eq!(request["timezone"], 3600);
    }

    #[test]
    fn test_device_commands() {
        assert_eq!(
            rendered(&UnregisterDeviceCommand::new(CODE, HWID)),
            json!({"request": {"application": CODE, "hwid": HWID}})
        );
        assert_eq!(
            rendered(&SetTagsCommand::new(CODE, HWID).tag("testtag", "test")),
            json!({"request": {"application": CODE, "hwid": HWID, "tags": {"testtag": "test"}}})
        );
        assert_eq!(
            rendered(&SetBadgeCommand::new(CODE, HWID, 5)),
            json!({"request": {"application": CODE, "hwid": HWID, "badges": 5}})
        );
        assert_eq!(
            rendered(&PushStatCommand::new(CODE, HWID, "test_hash")),
            json!({"request": {"application": CODE, "hwid": HWID, "hash": "test_hash"}})
        );
        assert_eq!(
            rendered(&GetNearestZoneCommand::new(CODE, HWID, 52.52, 13.405)),
            json!({"request": {"application": CODE, "hwid": HWID, "lat": 52.52, "lng": 13.405}})
        );
    }

    #[test]
    fn test_nearest_zone_rejects_non_finite_coordinates() {
        let err = GetNearestZoneCommand::new(CODE, HWID, f64::NAN, 1.0).render().unwrap_err();
        assert!(matches!(err, PushError::InvalidField { field: "lat", .. }));
        assert!(err.is_validation());

        let err = GetNearestZoneCommand::new(CODE, HWID, 1.0, f64::INFINITY)
            .compile()
            .unwrap_err();
        assert!(matches!(err, PushError::InvalidField { field: "lng", .. }));
    }

    #[test]
    fn test_device_commands_need_no_auth() {
        let command = SetBadgeCommand::new(CODE, HWID, 0);
        assert!(!command.kind().requires_auth());
        assert!(command.compile().is_ok());
    }
}
