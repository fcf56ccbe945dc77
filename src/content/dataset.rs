//! The compiled-in archive dataset, in authored order.

use chrono::NaiveDateTime;

use super::item::{EmailMessage, Item};
use super::store::ContentError;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn datetime(id: &str, value: &str) -> Result<NaiveDateTime, ContentError> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|source| {
        ContentError::InvalidDatetime {
            id: id.to_string(),
            value: value.to_string(),
            source,
        }
    })
}

/// All authored items, before normalization and shuffling
pub fn authored() -> Result<Vec<Item>, ContentError> {
    Ok(vec![
        Item::document("test1", datetime("test1", "2024-01-01 12:00:00")?, "test", "test.pdf")
            .with_keywords(["testtest"])
            .with_priority(1),
        Item::email(
            "mmz23",
            datetime("mmz23", "2024-12-10 20:03:00")?,
            "Telekommunikationsüberwachung M. Maus",
            EmailMessage::new(
                "martin.maus@vdh.de",
                ["felix@mousebook.de"],
                "Brauche deinen Rat",
                MMZ23_BODY,
            ),
        )
        .with_priority(1),
    ])
}

const MMZ23_BODY: &str = "Lieber Felix,

ich schreibe dir, weil ich mich gerade in einer wirklich komplizierten Lage befinde und nicht weiß, was ich tun soll. Du bist jemand, dessen Meinung ich immer sehr geschätzt habe, also dachte ich, ich frage dich um Rat.

Wie du weißt, arbeite ich seit einiger Zeit für die Kontrollmäuse. Ein Job, der eigentlich genau mein Ding ist: Unparteiisch, fair und gewissenhaft. Aber letzte Woche ist etwas passiert, das mich ins Grübeln gebracht hat.

Im Rahmen einer Routineüberwachung habe ich ein Gespräch aufgezeichnet, in dem deutlich wurde, dass unsere Zielmaus plant in die Hausmauswahl 2024 einzugreifen.

Was soll ich nur tun?

Bei meiner Vereidigung habe ich geschworen, absolute Vertraulichkeit zu wahren. Der Eid der Nagerischen Sicherheitsagentur ist bindend, und ein Verstoß könnte nicht nur meine Karriere beenden, sondern auch rechtliche Konsequenzen haben. Andererseits - wenn hier tatsächlich jemand versucht, die Wahl zu manipulieren, müssen wir das doch verhindern! Nach dem Skandal von 2023 können wir uns keine weitere Manipulation leisten.

Was würdest Du an meiner Stelle tun? Gibt es vielleicht einen Weg, die richtigen Stellen zu informieren, ohne meinen Eid zu brechen? Ich habe auch schon überlegt, ob ich anonym einen Hinweis geben könnte, aber selbst das könnte man eventuell zu mir zurückverfolgen.

Bitte lass mich wissen, was Du davon hältst. Ich vertraue auf Deine Verschwiegenheit und Deinen Rat.

In gespannter Erwartung Deiner Antwort,
Martin

P.S.: Lösche diese E-Mail bitte sofort nach dem Lesen. Man weiß nie, wer mitliest...";
