use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde::Serialize;

use query_values::Timestamp;

fn date_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2014-11-28T21:45:59.324310806+09:00").unwrap()
}

#[test]
fn test_dates() {
    #[derive(Serialize)]
    struct Params {
        date_time: DateTime<FixedOffset>,
    }

    // chrono's own impl is an ordinary string
    let params = Params {
        date_time: date_time(),
    };
    let s = query_values::to_string(&params).unwrap();
    assert_eq!(s, "date_time=2014-11-28T21%3A45%3A59.324310806%2B09%3A00");
}

#[test]
fn test_timestamps() {
    #[derive(Serialize)]
    struct Params {
        at: Timestamp,
        #[serde(rename = "unix,unix")]
        unix: Timestamp,
        #[serde(rename = "milli,unixmilli")]
        milli: Timestamp,
        #[serde(rename = "nano,unixnano")]
        nano: Timestamp,
    }

    let t = Timestamp::from(date_time());
    let params = Params {
        at: t,
        unix: t,
        milli: t,
        nano: t,
    };
    let values = query_values::to_values(&params).unwrap();
    // whole seconds, offset kept
    assert_eq!(values.get("at"), Some("2014-11-28T21:45:59+09:00"));
    assert_eq!(values.get("unix"), Some("1417178759"));
    assert_eq!(values.get("milli"), Some("1417178759324"));
    assert_eq!(values.get("nano"), Some("1417178759324310806"));
}

#[test]
fn test_utc_uses_z() {
    #[derive(Serialize)]
    struct Params {
        at: Timestamp,
    }

    let at = Utc.with_ymd_and_hms(2011, 11, 11, 11, 11, 11).unwrap().into();
    insta::assert_snapshot!(
        query_values::to_string(&Params { at }).unwrap(),
        @"at=2011-11-11T11%3A11%3A11Z"
    );
}

#[test]
fn test_time_formats() {
    #[derive(Serialize)]
    struct Params {
        #[serde(rename = "day,time_format:%Y-%m-%d")]
        day: Timestamp,
        #[serde(rename = "clock,layout:%H:%M:%S%.3f %z")]
        clock: Timestamp,
        #[serde(rename = "bad,time_format:%Q")]
        bad: Timestamp,
    }

    let t = Timestamp::from(date_time());
    let params = Params {
        day: t,
        clock: t,
        bad: t,
    };
    let values = query_values::to_values(&params).unwrap();
    assert_eq!(values.get("day"), Some("2014-11-28"));
    assert_eq!(values.get("clock"), Some("21:45:59.324 +0900"));
    // an unusable layout falls back to RFC 3339
    assert_eq!(values.get("bad"), Some("2014-11-28T21:45:59+09:00"));
}

#[test]
fn test_optional_timestamps() {
    #[derive(Serialize)]
    struct Params {
        #[serde(rename = "from,unix")]
        from: Option<Timestamp>,
        #[serde(rename = "to,unix")]
        to: Option<Timestamp>,
    }

    let params = Params {
        from: Some(Timestamp::from(date_time())),
        to: None,
    };
    assert_eq!(query_values::to_string(&params).unwrap(), "from=1417178759");
}

#[test]
fn test_zero_timestamp() {
    #[derive(Serialize)]
    struct Params {
        #[serde(rename = "plain")]
        plain: Timestamp,
        #[serde(rename = "omitted,omitempty")]
        omitted: Timestamp,
    }

    let params = Params {
        plain: Timestamp::zero(),
        omitted: Timestamp::default(),
    };
    assert_eq!(query_values::to_string(&params).unwrap(), "plain=");
    assert!(Timestamp::zero().is_zero());
    assert_eq!(Timestamp::zero().unix(), Timestamp::ZERO_SECS);
}

#[test]
fn test_serialize_with_helper() {
    #[derive(Serialize)]
    struct Params {
        #[serde(rename = "since,unix")]
        #[serde(serialize_with = "query_values::helpers::timestamp::serialize")]
        since: DateTime<FixedOffset>,
        #[serde(rename = "until,time_format:%d.%m.%Y")]
        #[serde(serialize_with = "query_values::helpers::timestamp::option::serialize")]
        until: Option<DateTime<Utc>>,
    }

    let params = Params {
        since: date_time(),
        until: Some(Utc.with_ymd_and_hms(2015, 1, 2, 3, 4, 5).unwrap()),
    };
    assert_eq!(
        query_values::to_string(&params).unwrap(),
        "since=1417178759&until=02.01.2015"
    );
}

#[test]
fn test_timestamp_in_other_formats() {
    // outside this crate a timestamp is a plain RFC 3339 string
    let t = Timestamp::from(date_time());
    assert_eq!(
        serde_json::to_value(t).unwrap(),
        serde_json::json!("2014-11-28T21:45:59.324310806+09:00")
    );
    assert_eq!(DateTime::<FixedOffset>::from(t), date_time());
}

#[test]
fn test_far_future_timestamps() {
    #[derive(Serialize)]
    struct Params {
        #[serde(rename = "t,unix")]
        t: Timestamp,
        #[serde(rename = "ms,unixmilli")]
        ms: Timestamp,
        #[serde(rename = "day,time_format:%Y-%m-%d")]
        day: Timestamp,
    }

    let t: Timestamp = Utc.with_ymd_and_hms(12000, 1, 1, 0, 0, 0).unwrap().into();
    let values = query_values::to_values(&Params { t, ms: t, day: t }).unwrap();
    assert_eq!(values.get("t"), Some("316516204800"));
    assert_eq!(values.get("ms"), Some("316516204800000"));
    assert_eq!(values.get("day"), Some("+12000-01-01"));

    // other formats still get text
    let json = serde_json::to_value(t).unwrap();
    assert!(json.as_str().unwrap().contains("12000-01-01T00:00:00"));
}
