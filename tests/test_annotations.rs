use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde::Serialize;
use std::collections::BTreeMap;

use query_values::{Annotation, Config, Timestamp};

fn readable<T: Serialize>(data: &T) -> String {
    Config::new()
        .use_form_encoding(false)
        .encode_string(data)
        .expect("encode")
}

fn create_time() -> Timestamp {
    Utc.with_ymd_and_hms(2011, 11, 11, 11, 11, 11).unwrap().into()
}

#[derive(Serialize)]
struct SubStruct {
    #[serde(rename = "name,omitempty")]
    name: String,
}

#[derive(Serialize)]
struct SubStructInline {
    #[serde(rename = "inlineName,omitempty")]
    inline_name: String,
}

#[derive(Serialize)]
#[allow(non_snake_case)]
struct Everything {
    IsClean: bool,
    #[serde(rename = "IsCleanNum,int")]
    is_clean_num: bool,
    #[serde(rename = "-")]
    is_clean_num_s: bool,
    #[serde(rename = "-,")]
    is_clean_num_ss: bool,
    #[serde(rename = "index")]
    index: Vec<String>,
    #[serde(rename = "index_by_comma,del:comma")]
    index_by_comma: Vec<u32>,
    #[serde(rename = "index_by_space,del:space")]
    index_by_space: Vec<u32>,
    #[serde(rename = "index_by_semicolon,del:semicolon")]
    index_by_semicolon: Vec<u32>,
    #[serde(rename = "index_by_brackets,del:brackets")]
    index_by_brackets: Vec<u32>,
    #[serde(rename = "index_by_custom,del:-")]
    index_by_custom: Vec<u32>,
    #[serde(rename = "token,omitempty")]
    token: String,
    #[serde(rename = "create_time,omitempty,time_format:%Y-%m-%d %H:%M:%S")]
    create_time: Timestamp,
    #[serde(rename = "create_date,time_format:%Y-%m-%d,omitempty")]
    create_date: Timestamp,
    #[serde(rename = "create_time_unix,unix,omitempty")]
    create_time_unix: Timestamp,
    #[serde(rename = "create_time_unixmilli,unixmilli,omitempty")]
    create_time_unixmilli: Timestamp,
    #[serde(rename = "create_time_unixnano,unixnano,omitempty")]
    create_time_unixnano: Timestamp,
    #[serde(rename = "sub_struct,omitempty")]
    sub_struct: SubStruct,
    #[serde(rename = ",inline,omitempty")]
    sub_struct_inline: SubStructInline,
}

#[test]
fn annotations_all_together() {
    let query = Everything {
        IsClean: false,
        is_clean_num: true,
        is_clean_num_s: true,
        is_clean_num_ss: false,
        index: vec!["1".to_owned(), "2".to_owned()],
        index_by_comma: vec![3, 4],
        index_by_space: vec![5, 6],
        index_by_semicolon: vec![7, 8],
        index_by_brackets: vec![9, 10],
        index_by_custom: vec![10, 11],
        token: String::new(),
        create_time: create_time(),
        create_date: create_time(),
        create_time_unix: create_time(),
        create_time_unixmilli: create_time(),
        create_time_unixnano: create_time(),
        sub_struct: SubStruct {
            name: "ssss".to_owned(),
        },
        sub_struct_inline: SubStructInline {
            inline_name: "inlineName".to_owned(),
        },
    };

    assert_eq!(
        query_values::to_string(&query).unwrap(),
        "-=false&IsClean=false&IsCleanNum=1&create_date=2011-11-11&\
         create_time=2011-11-11+11%3A11%3A11&create_time_unix=1321009871&\
         create_time_unixmilli=1321009871000&create_time_unixnano=1321009871000000000&\
         index=1&index=2&index_by_brackets%5B%5D=9&index_by_brackets%5B%5D=10&\
         index_by_comma=3%2C4&index_by_custom=10-11&index_by_semicolon=7%3B8&\
         index_by_space=5+6&inlineName=inlineName&sub_struct%5Bname%5D=ssss"
    );
}

#[test]
fn skip_marker() {
    #[derive(Serialize)]
    struct Query {
        #[serde(rename = "-")]
        hidden: &'static str,
        #[serde(rename = "-,")]
        dash: &'static str,
        #[serde(rename = "-,omitempty")]
        empty_dash: &'static str,
    }

    let query = Query {
        hidden: "secret",
        dash: "shown",
        empty_dash: "",
    };
    assert_eq!(readable(&query), "-=shown");
}

#[test]
fn omitempty() {
    #[derive(Serialize)]
    struct Nested {
        a: u8,
    }

    #[derive(Serialize)]
    struct Query {
        #[serde(rename = "b,omitempty")]
        b: bool,
        #[serde(rename = "i,omitempty")]
        i: i64,
        #[serde(rename = "f,omitempty")]
        f: f64,
        #[serde(rename = "s,omitempty")]
        s: String,
        #[serde(rename = "v,omitempty")]
        v: Vec<u8>,
        #[serde(rename = "m,omitempty")]
        m: BTreeMap<String, String>,
        #[serde(rename = "o,omitempty")]
        o: Option<String>,
        #[serde(rename = "t,omitempty")]
        t: Timestamp,
        // records are never empty
        #[serde(rename = "n,omitempty")]
        n: Nested,
    }

    let query = Query {
        b: false,
        i: 0,
        f: 0.0,
        s: String::new(),
        v: vec![],
        m: BTreeMap::new(),
        o: None,
        t: Timestamp::default(),
        n: Nested { a: 0 },
    };
    assert_eq!(readable(&query), "n[a]=0");

    // a present option is judged by its contents
    let query = Query {
        o: Some(String::new()),
        i: -1,
        ..query
    };
    assert_eq!(readable(&query), "i=-1&n[a]=0");
}

#[test]
fn zero_timestamp_without_omitempty() {
    #[derive(Serialize)]
    struct Query {
        #[serde(rename = "t,unix")]
        t: Timestamp,
    }

    assert_eq!(readable(&Query { t: Timestamp::zero() }), "t=");
}

#[test]
fn int_booleans() {
    #[derive(Serialize)]
    struct Query {
        #[serde(rename = "yes,int")]
        yes: bool,
        #[serde(rename = "no,int")]
        no: bool,
        #[serde(rename = "all,int,del:comma")]
        all: Vec<bool>,
        #[serde(rename = "count,int")]
        count: u8,
    }

    let query = Query {
        yes: true,
        no: false,
        all: vec![true, false, true],
        count: 7,
    };
    assert_eq!(readable(&query), "all=1,0,1&count=7&no=0&yes=1");
}

#[test]
fn delimiters() {
    #[derive(Serialize)]
    struct Query {
        #[serde(rename = "pipe,del:|")]
        pipe: Vec<&'static str>,
        #[serde(rename = "word,del:and")]
        word: Vec<u8>,
        #[serde(rename = "repeat,del:")]
        repeat: Vec<u8>,
        #[serde(rename = "array,del:comma")]
        array: [u8; 3],
        #[serde(rename = "tuple,del:space")]
        tuple: (u8, &'static str),
        #[serde(rename = "none,del:comma")]
        none: Vec<u8>,
    }

    let query = Query {
        pipe: vec!["a", "b"],
        word: vec![1, 2],
        repeat: vec![3, 4],
        array: [5, 6, 7],
        tuple: (8, "x"),
        none: vec![],
    };
    insta::assert_snapshot!(
        readable(&query),
        @"array=5,6,7&pipe=a|b&repeat=3&repeat=4&tuple=8+x&word=1and2"
    );
}

#[test]
fn timestamp_sequences() {
    #[derive(Serialize)]
    struct Query {
        #[serde(rename = "at,unix,del:comma")]
        at: Vec<Timestamp>,
        #[serde(rename = "on,time_format:%d/%m")]
        on: Vec<Timestamp>,
    }

    let query = Query {
        at: vec![create_time(), Timestamp::zero()],
        on: vec![create_time()],
    };
    assert_eq!(readable(&query), "at=1321009871,&on=11/11");
}

#[test]
fn nested_scopes() {
    #[derive(Serialize)]
    struct Leaf {
        #[serde(rename = "v,del:brackets")]
        v: Vec<u8>,
        #[serde(rename = "w,omitempty")]
        w: u8,
    }

    #[derive(Serialize)]
    struct Middle {
        #[serde(rename = "leaf")]
        leaf: Leaf,
        #[serde(rename = ",inline")]
        flat: Leaf,
    }

    #[derive(Serialize)]
    struct Root {
        #[serde(rename = "mid")]
        mid: Middle,
        #[serde(rename = "named,inline")]
        named: Leaf,
    }

    let leaf = || Leaf { v: vec![1], w: 0 };
    let root = Root {
        mid: Middle {
            leaf: leaf(),
            flat: Leaf { v: vec![2], w: 3 },
        },
        named: leaf(),
    };
    insta::assert_snapshot!(
        readable(&root),
        @"mid[leaf][v][]=1&mid[v][]=2&mid[w]=3&named[v][]=1"
    );
}

#[test]
fn inline_map() {
    #[derive(Serialize)]
    struct Query {
        #[serde(rename = "page")]
        page: u32,
        #[serde(rename = ",inline")]
        extra: BTreeMap<String, Vec<String>>,
        #[serde(rename = "filter")]
        filter: BTreeMap<String, String>,
    }

    let query = Query {
        page: 1,
        extra: [("tag".to_owned(), vec!["a".to_owned(), "b".to_owned()])]
            .into_iter()
            .collect(),
        filter: [("state".to_owned(), "open".to_owned())].into_iter().collect(),
    };
    assert_eq!(readable(&query), "filter[state]=open&page=1&tag=a&tag=b");
}

#[test]
fn flattened_fields_keep_annotations() {
    #[derive(Serialize)]
    struct Page {
        #[serde(rename = "size,omitempty")]
        size: u32,
        #[serde(rename = "sort,del:comma")]
        sort: Vec<&'static str>,
    }

    #[derive(Serialize)]
    struct Search {
        #[serde(rename = "q,omitempty")]
        q: &'static str,
        #[serde(rename = "-")]
        secret: &'static str,
        #[serde(flatten)]
        page: Page,
    }

    let search = Search {
        q: "",
        secret: "pw",
        page: Page {
            size: 0,
            sort: vec!["a", "b"],
        },
    };
    assert_eq!(query_values::to_string(&search).unwrap(), "sort=a%2Cb");

    #[derive(Serialize)]
    struct Outer {
        #[serde(rename = "search")]
        search: Search,
        #[serde(rename = "labels")]
        labels: BTreeMap<&'static str, u8>,
    }

    // keys of real maps are taken literally
    let outer = Outer {
        search,
        labels: [("x,omitempty", 0)].into_iter().collect(),
    };
    assert_eq!(
        readable(&outer),
        "labels[x,omitempty]=0&search[sort]=a,b"
    );
}

#[test]
fn empty_name_without_inline() {
    #[derive(Serialize)]
    struct Inner {
        a: u8,
    }

    #[derive(Serialize)]
    struct Query {
        #[serde(rename = ",omitempty")]
        value: u8,
        #[serde(rename = ",int")]
        inner: Inner,
    }

    // serde only reports the field's serialized name, so an empty name
    // yields an empty key
    let query = Query {
        value: 4,
        inner: Inner { a: 1 },
    };
    assert_eq!(readable(&query), "=4&a=1");
}

#[test]
fn parse_annotation() {
    let annotation = Annotation::parse("created,omitempty,time_format:%H:%M,del:");
    assert_eq!(annotation.name(), "created");
    assert!(!annotation.is_skipped());

    let options = annotation.options();
    assert!(options.contains("omitempty"));
    assert!(options.contains("del"));
    assert_eq!(options.get("del"), "");
    assert_eq!(options.get("time_format"), "%H:%M");
    assert!(!options.contains("unix"));

    assert!(Annotation::parse("-").is_skipped());
    assert!(!Annotation::parse("-,").is_skipped());
    assert_eq!(Annotation::parse("-,").name(), "-");
}
