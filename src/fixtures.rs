//! Small bilingual corpus shared by unit tests.

use crate::{Axis, Language, Record, RecordStore, TagMeta};

fn rec(id: &str, language: Language, text: &str, author: &str, work: &str) -> Record {
    Record {
        id: id.to_string(),
        text: text.to_string(),
        language,
        author_id: author.to_string(),
        work_id: work.to_string(),
        chapter: None,
        genre_ids: Vec::new(),
        time_ids: Vec::new(),
        theme_ids: Vec::new(),
        device_ids: Vec::new(),
    }
}

/// Genre, time, theme and device ids, in that order.
fn tagged(mut record: Record, [genres, times, themes, devices]: [&[&str]; 4]) -> Record {
    let owned = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    record.genre_ids = owned(genres);
    record.time_ids = owned(times);
    record.theme_ids = owned(themes);
    record.device_ids = owned(devices);
    record
}

fn named(id: &str, zh: Option<&str>, en: Option<&str>) -> TagMeta {
    TagMeta {
        id: id.to_string(),
        name_zh: zh.map(str::to_string),
        name_en: en.map(str::to_string),
        ..TagMeta::default()
    }
}

fn titled(id: &str, zh: &str, en: &str, author: &str) -> TagMeta {
    TagMeta {
        id: id.to_string(),
        title_zh: Some(zh.to_string()),
        title_en: Some(en.to_string()),
        author_id: Some(author.to_string()),
        ..TagMeta::default()
    }
}

pub(crate) fn records() -> Vec<Record> {
    use Language::{Primary as Zh, Secondary as En};
    vec![
        tagged(
            rec("z1", Zh, "[ZH01] 月光照在雪地上，夜很静。", "lu-xun", "nahan"),
            [&["fiction"], &["night", "winter"], &["loneliness"], &["metaphor"]],
        ),
        tagged(
            rec("z2", Zh, "[ZH02] 她爱他，也恨这座城。", "zhang-ailing", "qingcheng"),
            [&["fiction"], &["night"], &["love", "war"], &["irony"]],
        ),
        tagged(
            rec("z3", Zh, "[ZH03] 黎明时分，他们并肩而行。", "zhang-ailing", "qingcheng"),
            [&["fiction"], &["dawn"], &["love", "friendship"], &["simile"]],
        ),
        tagged(
            rec("z4", Zh, "[ZH04] 魔法在夜里苏醒。", "jk", "hp"),
            [&["fantasy"], &["night"], &["friendship"], &["metaphor"]],
        ),
        tagged(
            rec("e1", En, "[EN01] The moon was cold over the winter snow.", "lu-xun", "nahan"),
            [&["fiction"], &["night", "winter"], &["loneliness"], &["metaphor", "simile"]],
        ),
        tagged(
            rec("e2", En, "[EN02] Harry looked at his friends and smiled.", "jk", "hp"),
            [&["fantasy"], &["dawn", "dusk"], &["friendship"], &["simile"]],
        ),
        tagged(
            rec("e3", En, "[EN03] Not all those who wander are lost.", "tolkien", "lotr"),
            [&["fantasy"], &["night"], &["friendship", "war"], &["metaphor", "irony"]],
        ),
        tagged(
            rec("e4", En, "[EN04] The war came to the Shire at night.", "tolkien", "lotr"),
            [&["fantasy"], &["night"], &["war"], &["irony"]],
        ),
        tagged(
            rec("e5", En, "[EN05] Love was a quiet thing in Hong Kong.", "zhang-ailing", "qingcheng"),
            [&["fiction"], &["night"], &["love"], &["irony"]],
        ),
        tagged(
            rec("e6", En, "[EN06] Hermione loved the library at night.", "jk", "hp"),
            [&["fantasy"], &["night"], &["friendship", "love"], &["metaphor"]],
        ),
    ]
}

pub(crate) fn store() -> RecordStore {
    store_with(records())
}

/// The fixture metadata tables around a custom record list.
pub(crate) fn store_with(records: Vec<Record>) -> RecordStore {
    RecordStore::new(records)
        .with_table(
            Axis::Author,
            [
                TagMeta { emoji: Some("✒️".to_string()), ..named("lu-xun", Some("鲁迅"), Some("Lu Xun")) },
                named("zhang-ailing", Some("张爱玲"), Some("Eileen Chang")),
                named("jk", Some("J.K.罗琳"), Some("J.K. Rowling")),
                named("tolkien", None, Some("J.R.R. Tolkien")),
            ],
        )
        .with_table(
            Axis::Work,
            [
                titled("nahan", "呐喊", "Call to Arms", "lu-xun"),
                titled("qingcheng", "倾城之恋", "Love in a Fallen City", "zhang-ailing"),
                titled("hp", "哈利·波特", "Harry Potter", "jk"),
                titled("lotr", "魔戒", "The Lord of the Rings", "tolkien"),
            ],
        )
        .with_table(
            Axis::Genre,
            [
                named("fiction", Some("小说"), Some("Fiction")),
                named("fantasy", Some("奇幻"), Some("fantasy")),
                named("essay", Some("散文"), Some("Essay")),
            ],
        )
        .with_table(
            Axis::Time,
            [
                named("night", Some("夜晚"), Some("Night")),
                named("dawn", Some("黎明"), Some("Dawn")),
                named("winter", Some("冬天"), Some("Winter")),
            ],
        )
        .with_table(
            Axis::Theme,
            [
                named("love", Some("爱情"), Some("Love")),
                named("war", Some("战争"), Some("War")),
                named("friendship", Some("友谊"), Some("Friendship")),
                named("loneliness", Some("孤独"), Some("Loneliness")),
            ],
        )
        .with_table(
            Axis::Device,
            [
                named("metaphor", Some("隐喻"), Some("Metaphor")),
                named("irony", Some("反讽"), Some("Irony")),
                named("simile", Some("明喻"), None),
            ],
        )
}

/// Ids of `records`, in order.
pub(crate) fn ids(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}
