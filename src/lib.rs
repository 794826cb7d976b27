// Pushwoosh - a client for the Pushwoosh remote API
//
// This library builds notification payloads and device-targeting filter
// expressions, wraps them in API commands, and posts them over HTTP.

// Re-export the member crates
pub use pushwoosh_filter as filter;
pub use pushwoosh_http_client as http;
pub use pushwoosh_push as push;

// Re-export the most used items at the root
pub use pushwoosh_filter::{
    ApplicationFilter, ApplicationScope, Filter, FilterError, Operand, Operator, Platform,
    SetOperation, SetOps, TagFilter, ValueKind,
};
pub use pushwoosh_push::{
    ClientConfig, Command, CommandKind, CompileFilterCommand, Condition, Content,
    CreateMessageCommand, CreateTargetedMessageCommand, DeleteMessageCommand, DevicesFilter,
    GetNearestZoneCommand, LinkMinimizer, MessageFields, Notification, PushError, PushStatCommand,
    PushwooshClient, RegisterDeviceCommand, SendDate, SetBadgeCommand, SetTagsCommand, Transport,
    TransportRequest, UnregisterDeviceCommand,
};

// Prelude for common imports
pub mod prelude {
    pub use pushwoosh_filter::{
        ApplicationFilter, Filter, FilterError, Operand, Operator, Platform, SetOps, TagFilter,
        ValueKind,
    };
    pub use pushwoosh_push::prelude::*;
    pub use pushwoosh_push::{
        GetNearestZoneCommand, PushStatCommand, RegisterDeviceCommand, SetBadgeCommand,
        SetTagsCommand, UnregisterDeviceCommand,
    };
}
