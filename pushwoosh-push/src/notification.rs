//! Notification payloads.

use chrono::NaiveDateTime;
use pushwoosh_filter::Platform;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::aspect::{Aspect, Fields, compose, to_fields};
use crate::platform::{
    AmazonFields, AndroidFields, BlackBerryFields, ChromeFields, IosFields, MacFields,
    PlatformFields, SafariFields, WindowsFields, WindowsPhoneFields,
};
use crate::selection::{Condition, DeviceSelection};
use crate::{PushError, Result};

/// Layout of a scheduled `send_date`.
pub const SEND_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// When a message is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendDate {
    /// Send immediately.
    #[default]
    Now,
    /// Send at the given time.
    At(NaiveDateTime),
}

impl fmt::Display for SendDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendDate::Now => f.write_str("now"),
            SendDate::At(at) => write!(f, "{}", at.format(SEND_DATE_FORMAT)),
        }
    }
}

impl FromStr for SendDate {
    type Err = PushError;

    /// Parse `now` or `YYYY-MM-DD HH:MM`.
    fn from_str(value: &str) -> Result<Self> {
        if value == "now" {
            return Ok(SendDate::Now);
        }
        NaiveDateTime::parse_from_str(value, SEND_DATE_FORMAT)
            .map(SendDate::At)
            .map_err(|e| PushError::InvalidField {
                field: "send_date",
                reason: format!("{value:?}: {e}"),
            })
    }
}

impl Serialize for SendDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<NaiveDateTime> for SendDate {
    fn from(at: NaiveDateTime) -> Self {
        SendDate::At(at)
    }
}

/// Message text, either one string or a language to text map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Same text for every language.
    Text(String),
    /// Text per language code.
    Localized(BTreeMap<String, String>),
}

impl Content {
    /// Build localized content from `(language, text)` pairs.
    pub fn localized<L, T>(texts: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Content::Localized(
            texts
                .into_iter()
                .map(|(lang, text)| (lang.into(), text.into()))
                .collect(),
        )
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<BTreeMap<String, String>> for Content {
    fn from(texts: BTreeMap<String, String>) -> Self {
        Content::Localized(texts)
    }
}

/// URL shortener applied to `link`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkMinimizer {
    /// Leave the link as is.
    None,
    /// goo.gl
    #[default]
    Google,
    /// bit.ly
    Bitly,
}

impl LinkMinimizer {
    /// Get the wire code.
    pub fn code(&self) -> u8 {
        match self {
            LinkMinimizer::None => 0,
            LinkMinimizer::Google => 1,
            LinkMinimizer::Bitly => 2,
        }
    }
}

impl Serialize for LinkMinimizer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Fields shared by every message.
///
/// `content` and `send_date` are always rendered, `content` as `null`
/// when unset. `minimize_link` is rendered only together with `link`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonFields {
    /// When the message is sent. Defaults to `now`.
    pub send_date: SendDate,
    /// Message text, plain or per language.
    pub content: Option<Content>,
    /// Send at `send_date` in UTC instead of device local time.
    pub ignore_user_timezone: Option<bool>,
    /// Rich page id.
    pub page_id: Option<u64>,
    /// Link opened when the message is tapped.
    pub link: Option<String>,
    /// Shortener applied to `link`.
    pub minimize_link: LinkMinimizer,
    /// Custom data delivered to the application.
    pub data: Option<Value>,
}

#[derive(Serialize)]
struct CommonView<'a> {
    send_date: SendDate,
    content: Option<&'a Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignore_user_timezone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimize_link: Option<LinkMinimizer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

impl Aspect for CommonFields {
    fn name(&self) -> &'static str {
        "common"
    }

    fn fields(&self) -> &'static [&'static str] {
        &[
            "send_date",
            "content",
            "ignore_user_timezone",
            "page_id",
            "link",
            "minimize_link",
            "data",
        ]
    }

    fn render(&self) -> Result<Fields> {
        to_fields(&CommonView {
            send_date: self.send_date,
            content: self.content.as_ref(),
            ignore_user_timezone: self.ignore_user_timezone,
            page_id: self.page_id,
            link: self.link.as_deref(),
            minimize_link: self.link.as_ref().map(|_| self.minimize_link),
            data: self.data.as_ref(),
        })
    }
}

/// Builder methods for anything carrying common and platform fields.
pub trait MessageFields: Sized {
    /// Mutable access to the common fields.
    fn common_mut(&mut self) -> &mut CommonFields;

    /// Mutable access to the platform fields.
    fn platform_mut(&mut self) -> &mut PlatformFields;

    /// Set the message text.
    fn content(mut self, content: impl Into<Content>) -> Self {
        self.common_mut().content = Some(content.into());
        self
    }

    /// Set when the message is sent.
    fn send_date(mut self, send_date: impl Into<SendDate>) -> Self {
        self.common_mut().send_date = send_date.into();
        self
    }

    /// Ignore the device time zone when scheduling.
    fn ignore_user_timezone(mut self, ignore: bool) -> Self {
        self.common_mut().ignore_user_timezone = Some(ignore);
        self
    }

    /// Attach a rich page.
    fn page_id(mut self, page_id: u64) -> Self {
        self.common_mut().page_id = Some(page_id);
        self
    }

    /// Attach a link.
    fn link(mut self, link: impl Into<String>) -> Self {
        self.common_mut().link = Some(link.into());
        self
    }

    /// Choose the link shortener.
    fn minimize_link(mut self, minimizer: LinkMinimizer) -> Self {
        self.common_mut().minimize_link = minimizer;
        self
    }

    /// Attach custom data.
    fn data(mut self, data: Value) -> Self {
        self.common_mut().data = Some(data);
        self
    }

    /// Set the iOS fields.
    fn ios(mut self, fields: IosFields) -> Self {
        self.platform_mut().ios = fields;
        self
    }

    /// Set the Android fields.
    fn android(mut self, fields: AndroidFields) -> Self {
        self.platform_mut().android = fields;
        self
    }

    /// Set the Windows Phone fields.
    fn windows_phone(mut self, fields: WindowsPhoneFields) -> Self {
        self.platform_mut().windows_phone = fields;
        self
    }

    /// Set the OS X fields.
    fn mac(mut self, fields: MacFields) -> Self {
        self.platform_mut().mac = fields;
        self
    }

    /// Set the Windows 8 fields.
    fn windows(mut self, fields: WindowsFields) -> Self {
        self.platform_mut().windows = fields;
        self
    }

    /// Set the Safari fields.
    fn safari(mut self, fields: SafariFields) -> Self {
        self.platform_mut().safari = fields;
        self
    }

    /// Set the Amazon fields.
    fn amazon(mut self, fields: AmazonFields) -> Self {
        self.platform_mut().amazon = fields;
        self
    }

    /// Set the BlackBerry fields.
    fn blackberry(mut self, fields: BlackBerryFields) -> Self {
        self.platform_mut().blackberry = fields;
        self
    }

    /// Set the Chrome fields.
    fn chrome(mut self, fields: ChromeFields) -> Self {
        self.platform_mut().chrome = fields;
        self
    }
}

/// One entry of a `createMessage` notifications list.
///
/// Composed of the common aspect, all nine platform aspects and the
/// device selection aspect.
///
/// ```
/// use pushwoosh_push::{MessageFields, Notification};
///
/// let notification = Notification::new()
///     .content("Hello world!")
///     .users(["user_1"]);
///
/// let fields = notification.render()?;
/// assert_eq!(fields["content"], "Hello world!");
/// assert_eq!(fields["send_date"], "now");
/// # Ok::<(), pushwoosh_push::PushError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notification {
    /// Fields shared by every message.
    pub common: CommonFields,
    /// Per-platform fields.
    pub platform: PlatformFields,
    /// Recipients.
    pub selection: DeviceSelection,
}

impl Notification {
    /// Create an empty notification sent now.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict delivery to the given platforms.
    pub fn platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.selection.platforms = Some(platforms.into_iter().collect());
        self
    }

    /// Send to the given push tokens.
    pub fn devices<S: Into<String>>(mut self, devices: impl IntoIterator<Item = S>) -> Self {
        self.selection.devices = Some(devices.into_iter().map(Into::into).collect());
        self
    }

    /// Send to the given user ids.
    pub fn users<S: Into<String>>(mut self, users: impl IntoIterator<Item = S>) -> Self {
        self.selection.users = Some(users.into_iter().map(Into::into).collect());
        self
    }

    /// Use a filter saved on the server.
    pub fn filter(mut self, name: impl Into<String>) -> Self {
        self.selection.filter = Some(name.into());
        self
    }

    /// Add a tag condition.
    pub fn condition(mut self, condition: Condition) -> Self {
        self.selection
            .conditions
            .get_or_insert_with(Vec::new)
            .push(condition);
        self
    }

    /// Aspects in rendering order.
    pub fn aspects(&self) -> Vec<&dyn Aspect> {
        let mut aspects: Vec<&dyn Aspect> = Vec::with_capacity(11);
        aspects.push(&self.common);
        aspects.extend(self.platform.aspects());
        aspects.push(&self.selection);
        aspects
    }

    /// Render into a JSON object.
    pub fn render(&self) -> Result<Fields> {
        compose(&self.aspects())
    }
}

impl MessageFields for Notification {
    fn common_mut(&mut self) -> &mut CommonFields {
        &mut self.common
    }

    fn platform_mut(&mut self) -> &mut PlatformFields {
        &mut self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pushwoosh_filter::Operator;
    use serde_json::json;

    fn rendered(notification: &Notification) -> Value {
        Value::Object(notification.render().unwrap())
    }

    #[test]
    fn test_empty_notification() {
        assert_eq!(
            rendered(&Notification::new()),
            json!({"content": null, "send_date": "now"})
        );
    }

    #[test]
    fn test_common_fields() {
        let notification = Notification::new()
            .content("Hello World")
            .send_date("2014-05-13 00:00".parse::<SendDate>().unwrap())
            .ignore_user_timezone(true)
            .page_id(1)
            .link("http://test_link")
            .data(json!({"key": "value"}));

        assert_eq!(
            rendered(&notification),
            json!({
                "content": "Hello World",
                "send_date": "2014-05-13 00:00",
                "ignore_user_timezone": true,
                "page_id": 1,
                "link": "http://test_link",
                "minimize_link": 1,
                "data": {"key": "value"},
            })
        );
    }

    #[test]
    fn test_minimize_link_only_with_link() {
        let notification = Notification::new()
            .content("x")
            .minimize_link(LinkMinimizer::Bitly);
        assert!(notification.render().unwrap().get("minimize_link").is_none());

        let notification = notification.link("http://example.com");
        assert_eq!(notification.render().unwrap()["minimize_link"], 2);
    }

    #[test]
    fn test_localized_content() {
        let notification = Notification::new().content(Content::localized([
            ("en", "Hello"),
            ("ru", "Привет"),
        ]));

        assert_eq!(
            rendered(&notification)["content"],
            json!({"en": "Hello", "ru": "Привет"})
        );
    }

    #[test]
    fn test_send_date() {
        let at = NaiveDate::from_ymd_opt(2014, 5, 13)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(SendDate::from(at).to_string(), "2014-05-13 09:30");
        assert_eq!("now".parse::<SendDate>().unwrap(), SendDate::Now);

        let err = "tomorrow".parse::<SendDate>().unwrap_err();
        assert!(matches!(err, PushError::InvalidField { field: "send_date", .. }));
    }

    #[test]
    fn test_platform_fields() {
        let notification = Notification::new()
            .content("Hi")
            .ios(IosFields {
                badges: Some(5),
                trim_content: Some(true),
                ..Default::default()
            })
            .android(AndroidFields {
                header: Some("Header".into()),
                gcm_ttl: Some(3600),
                ..Default::default()
            })
            .chrome(ChromeFields {
                ttl: Some(60),
                ..Default::default()
            });

        assert_eq!(
            rendered(&notification),
            json!({
                "content": "Hi",
                "send_date": "now",
                "ios_badges": 5,
                "apns_trim_content": true,
                "android_header": "Header",
                "android_gcm_ttl": 3600,
                "chrome_ttl": 60,
            })
        );
    }

    #[test]
    fn test_selection_fields() {
        let notification = Notification::new()
            .content("Hi")
            .platforms([Platform::Ios, Platform::Chrome])
            .devices(["token_1"])
            .condition(Condition::new("Level", Operator::Gte, 10).unwrap())
            .condition(Condition::new("City", Operator::In, ["Berlin", "Paris"]).unwrap());

        assert_eq!(
            rendered(&notification),
            json!({
                "content": "Hi",
                "send_date": "now",
                "platforms": [1, 11],
                "devices": ["token_1"],
                "conditions": [["Level", "GTE", 10], ["City", "IN", ["Berlin", "Paris"]]],
            })
        );
    }

    #[test]
    fn test_filter_with_conditions_fails() {
        let notification = Notification::new()
            .filter("Segment")
            .condition(Condition::new("Level", Operator::Eq, 1).unwrap());

        assert!(matches!(
            notification.render(),
            Err(PushError::MutuallyExclusive { .. })
        ));
    }

    #[test]
    fn test_aspects_are_disjoint() {
        let notification = Notification::new();
        assert_eq!(notification.aspects().len(), 11);
        assert!(compose(&notification.aspects()).is_ok());
    }
}
