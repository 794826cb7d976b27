//! Platform-specific notification fields.
//!
//! Each struct is one aspect. Only fields that are set are rendered.

use serde::Serialize;
use serde_json::Value;

use crate::Content;
use crate::aspect::{Aspect, serialized_aspect};

/// iOS (APNs) fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IosFields {
    /// Badge value sent to all targeted devices.
    #[serde(rename = "ios_badges", skip_serializing_if = "Option::is_none")]
    pub badges: Option<i64>,
    /// Sound file name in the main bundle.
    #[serde(rename = "ios_sound", skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Maximum message lifespan in seconds.
    #[serde(rename = "ios_ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// Notification category id from the control panel.
    #[serde(rename = "ios_category_id", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    /// Root level parameters for the `aps` dictionary.
    #[serde(rename = "ios_root_params", skip_serializing_if = "Option::is_none")]
    pub root_params: Option<Value>,
    /// Trim content that exceeds the payload limit with an ellipsis.
    #[serde(rename = "apns_trim_content", skip_serializing_if = "Option::is_none")]
    pub trim_content: Option<bool>,
}

serialized_aspect!(
    IosFields,
    "ios",
    [
        "ios_badges",
        "ios_sound",
        "ios_ttl",
        "ios_category_id",
        "ios_root_params",
        "apns_trim_content",
    ]
);

/// Android (GCM) fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AndroidFields {
    /// Root level parameters for the Android payload.
    #[serde(rename = "android_root_params", skip_serializing_if = "Option::is_none")]
    pub root_params: Option<Value>,
    /// Sound file name in `res/raw`, without extension.
    #[serde(rename = "android_sound", skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Notification header.
    #[serde(rename = "android_header", skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Icon resource name.
    #[serde(rename = "android_icon", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Full URL of a custom icon image.
    #[serde(rename = "android_custom_icon", skip_serializing_if = "Option::is_none")]
    pub custom_icon: Option<String>,
    /// Full URL of a banner image.
    #[serde(rename = "android_banner", skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    /// Maximum message lifespan in seconds.
    #[serde(rename = "android_gcm_ttl", skip_serializing_if = "Option::is_none")]
    pub gcm_ttl: Option<u64>,
}

serialized_aspect!(
    AndroidFields,
    "android",
    [
        "android_root_params",
        "android_sound",
        "android_header",
        "android_icon",
        "android_custom_icon",
        "android_banner",
        "android_gcm_ttl",
    ]
);

/// Windows Phone fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowsPhoneFields {
    /// `Tile` or `Toast`.
    #[serde(rename = "wp_type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Tile image.
    #[serde(rename = "wp_background", skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Back tile image.
    #[serde(rename = "wp_backbackground", skip_serializing_if = "Option::is_none")]
    pub back_background: Option<String>,
    /// Back tile title.
    #[serde(rename = "wp_backtitle", skip_serializing_if = "Option::is_none")]
    pub back_title: Option<String>,
    /// Back tile content.
    #[serde(rename = "wp_backcontent", skip_serializing_if = "Option::is_none")]
    pub back_content: Option<String>,
    /// Badge count.
    #[serde(rename = "wp_count", skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

serialized_aspect!(
    WindowsPhoneFields,
    "windows_phone",
    [
        "wp_type",
        "wp_background",
        "wp_backbackground",
        "wp_backtitle",
        "wp_backcontent",
        "wp_count",
    ]
);

/// OS X fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacFields {
    /// Badge value.
    #[serde(rename = "mac_badges", skip_serializing_if = "Option::is_none")]
    pub badges: Option<i64>,
    /// Sound file name in the application bundle.
    #[serde(rename = "mac_sound", skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Root level parameters for the `aps` dictionary.
    #[serde(rename = "mac_root_params", skip_serializing_if = "Option::is_none")]
    pub root_params: Option<Value>,
    /// Maximum message lifespan in seconds.
    #[serde(rename = "mac_ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

serialized_aspect!(
    MacFields,
    "mac",
    ["mac_badges", "mac_sound", "mac_root_params", "mac_ttl"]
);

/// Windows 8 (WNS) fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowsFields {
    /// Base64 encoded XML or raw content, plain or per language.
    #[serde(rename = "wns_content", skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// `Tile`, `Toast`, `Badge` or `Raw`.
    #[serde(rename = "wns_type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Tile replacement tag, at most 16 alphanumeric characters.
    #[serde(rename = "wns_tag", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

serialized_aspect!(WindowsFields, "windows", ["wns_content", "wns_type", "wns_tag"]);

/// Safari fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SafariFields {
    /// Title shown above the message text.
    #[serde(rename = "safari_title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Label of the action button.
    #[serde(rename = "safari_action", skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Values substituted into the website push URL format string.
    #[serde(rename = "safari_url_args", skip_serializing_if = "Option::is_none")]
    pub url_args: Option<Vec<String>>,
    /// Maximum message lifespan in seconds.
    #[serde(rename = "safari_ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

serialized_aspect!(
    SafariFields,
    "safari",
    ["safari_title", "safari_action", "safari_url_args", "safari_ttl"]
);

/// Amazon (ADM) fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AmazonFields {
    /// Root level parameters for the ADM payload.
    #[serde(rename = "adm_root_params", skip_serializing_if = "Option::is_none")]
    pub root_params: Option<Value>,
    /// Sound file name in `res/raw`, without extension.
    #[serde(rename = "adm_sound", skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Notification header.
    #[serde(rename = "adm_header", skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Icon resource name.
    #[serde(rename = "adm_icon", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Full URL of a custom icon image.
    #[serde(rename = "adm_custom_icon", skip_serializing_if = "Option::is_none")]
    pub custom_icon: Option<String>,
    /// Full URL of a banner image.
    #[serde(rename = "adm_banner", skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    /// Maximum message lifespan in seconds.
    #[serde(rename = "adm_ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

serialized_aspect!(
    AmazonFields,
    "amazon",
    [
        "adm_root_params",
        "adm_sound",
        "adm_header",
        "adm_icon",
        "adm_custom_icon",
        "adm_banner",
        "adm_ttl",
    ]
);

/// BlackBerry fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlackBerryFields {
    /// Notification header.
    #[serde(rename = "blackberry_header", skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

serialized_aspect!(BlackBerryFields, "blackberry", ["blackberry_header"]);

/// Chrome fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChromeFields {
    /// Notification header.
    #[serde(rename = "chrome_header", skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Full URL of the notification icon.
    #[serde(rename = "chrome_icon", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Maximum message lifespan in seconds.
    #[serde(rename = "chrome_ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}

serialized_aspect!(ChromeFields, "chrome", ["chrome_header", "chrome_icon", "chrome_ttl"]);

/// All nine platform aspects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformFields {
    /// iOS fields.
    pub ios: IosFields,
    /// Android fields.
    pub android: AndroidFields,
    /// Windows Phone fields.
    pub windows_phone: WindowsPhoneFields,
    /// OS X fields.
    pub mac: MacFields,
    /// Windows 8 fields.
    pub windows: WindowsFields,
    /// Safari fields.
    pub safari: SafariFields,
    /// Amazon fields.
    pub amazon: AmazonFields,
    /// BlackBerry fields.
    pub blackberry: BlackBerryFields,
    /// Chrome fields.
    pub chrome: ChromeFields,
}

impl PlatformFields {
    /// Borrow every platform aspect, in rendering order.
    pub fn aspects(&self) -> [&dyn Aspect; 9] {
        [
            &self.ios,
            &self.android,
            &self.windows_phone,
            &self.mac,
            &self.windows,
            &self.safari,
            &self.amazon,
            &self.blackberry,
            &self.chrome,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::compose;
    use serde_json::json;

    #[test]
    fn test_unset_platforms_render_nothing() {
        let fields = compose(&PlatformFields::default().aspects()).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_ios_fields() {
        let ios = IosFields {
            badges: Some(3),
            sound: Some("default".into()),
            category_id: Some(7),
            root_params: Some(json!({"aps": {"content-available": 1}})),
            ..Default::default()
        };

        assert_eq!(
            serde_json::Value::Object(ios.render().unwrap()),
            json!({
                "ios_badges": 3,
                "ios_sound": "default",
                "ios_category_id": 7,
                "ios_root_params": {"aps": {"content-available": 1}},
            })
        );
    }

    #[test]
    fn test_localized_wns_content() {
        let windows = WindowsFields {
            content: Some(Content::localized([("en", "aGVsbG8="), ("de", "aGFsbG8=")])),
            kind: Some("Toast".into()),
            tag: None,
        };

        assert_eq!(
            serde_json::Value::Object(windows.render().unwrap()),
            json!({"wns_content": {"de": "aGFsbG8=", "en": "aGVsbG8="}, "wns_type": "Toast"})
        );
    }

    #[test]
    fn test_rendered_keys_are_declared() {
        let platforms = PlatformFields {
            ios: IosFields {
                badges: Some(1),
                sound: Some("s".into()),
                ttl: Some(1),
                category_id: Some(1),
                root_params: Some(json!({})),
                trim_content: Some(true),
            },
            android: AndroidFields {
                root_params: Some(json!({})),
                sound: Some("s".into()),
                header: Some("h".into()),
                icon: Some("i".into()),
                custom_icon: Some("c".into()),
                banner: Some("b".into()),
                gcm_ttl: Some(1),
            },
            windows_phone: WindowsPhoneFields {
                kind: Some("Tile".into()),
                background: Some("b".into()),
                back_background: Some("bb".into()),
                back_title: Some("t".into()),
                back_content: Some("c".into()),
                count: Some(1),
            },
            mac: MacFields {
                badges: Some(1),
                sound: Some("s".into()),
                root_params: Some(json!({})),
                ttl: Some(1),
            },
            windows: WindowsFields {
                content: Some("c".into()),
                kind: Some("Raw".into()),
                tag: Some("t".into()),
            },
            safari: SafariFields {
                title: Some("t".into()),
                action: Some("a".into()),
                url_args: Some(vec!["x".into()]),
                ttl: Some(1),
            },
            amazon: AmazonFields {
                root_params: Some(json!({})),
                sound: Some("s".into()),
                header: Some("h".into()),
                icon: Some("i".into()),
                custom_icon: Some("c".into()),
                banner: Some("b".into()),
                ttl: Some(1),
            },
            blackberry: BlackBerryFields {
                header: Some("h".into()),
            },
            chrome: ChromeFields {
                header: Some("h".into()),
                icon: Some("i".into()),
                ttl: Some(1),
            },
        };

        for aspect in platforms.aspects() {
            let rendered = aspect.render().unwrap();
            assert_eq!(rendered.len(), aspect.fields().len(), "{}", aspect.name());
            for key in rendered.keys() {
                assert!(aspect.fields().contains(&key.as_str()), "{key}");
            }
        }
    }
}
