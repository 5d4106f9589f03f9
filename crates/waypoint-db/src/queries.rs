use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;
use waypoint_types::models::{Conversation, Message, NewConversation, NewMessage};

use crate::models::{self, ConversationRow, MessageRow, format_timestamp};
use crate::{Database, Result, StoreError};

impl Database {
    // -- Conversations --

    /// Most recently active first.
    pub fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, created_at, updated_at
                 FROM conversations
                 ORDER BY updated_at DESC, rowid DESC",
            )?;

            let rows = stmt
                .query_map([], conversation_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(Conversation::try_from).collect()
        })
    }

    pub fn get_conversation(&self, id: &Uuid) -> Result<Option<Conversation>> {
        self.with_conn(|conn| query_conversation(conn, id))
    }

    pub fn create_conversation(&self, new: NewConversation) -> Result<Conversation> {
        let now = models::now();
        let conversation = Conversation {
            id: Uuid::new_v4(),
            title: new.title,
            created_at: now,
            updated_at: now,
        };

        self.with_conn(|conn| {
            let ts = format_timestamp(&now);
            conn.execute(
                "INSERT INTO conversations (id, title, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![conversation.id.to_string(), &conversation.title, &ts, &ts],
            )?;
            Ok(())
        })?;

        Ok(conversation)
    }

    /// Returns whether a conversation existed. Its messages go with it.
    pub fn delete_conversation(&self, id: &Uuid) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM conversations WHERE id = ?1", [id.to_string()])?;
            Ok(deleted > 0)
        })
    }

    // -- Messages --

    /// Insertion order, independent of the wall clock. An unknown
    /// conversation yields an empty list.
    pub fn list_messages(&self, conversation_id: &Uuid) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, conversation_id, role, content, timestamp
                 FROM messages
                 WHERE conversation_id = ?1
                 ORDER BY rowid ASC",
            )?;

            let rows = stmt
                .query_map([conversation_id.to_string()], message_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(Message::try_from).collect()
        })
    }

    /// Appends a message and bumps the parent's `updated_at` in one
    /// transaction. Fails with [`StoreError::NotFound`] when the parent
    /// conversation does not exist.
    pub fn create_message(&self, new: NewMessage) -> Result<Message> {
        let message = Message {
            id: Uuid::new_v4(),
            conversation_id: new.conversation_id,
            role: new.role,
            content: new.content,
            timestamp: models::now(),
        };

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let ts = format_timestamp(&message.timestamp);
            let cid = message.conversation_id.to_string();

            let touched = tx.execute(
                "UPDATE conversations SET updated_at = ?1 WHERE id = ?2",
                rusqlite::params![&ts, &cid],
            )?;
            if touched == 0 {
                return Err(StoreError::NotFound);
            }

            tx.execute(
                "INSERT INTO messages (id, conversation_id, role, content, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    message.id.to_string(),
                    &cid,
                    message.role.as_str(),
                    &message.content,
                    &ts,
                ],
            )?;

            tx.commit()?;
            Ok(())
        })?;

        Ok(message)
    }
}

fn query_conversation(conn: &Connection, id: &Uuid) -> Result<Option<Conversation>> {
    let row = conn
        .query_row(
            "SELECT id, title, created_at, updated_at FROM conversations WHERE id = ?1",
            [id.to_string()],
            conversation_row,
        )
        .optional()?;

    row.map(Conversation::try_from).transpose()
}

fn conversation_row(row: &Row<'_>) -> rusqlite::Result<ConversationRow> {
    Ok(ConversationRow {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

fn message_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        role: row.get(2)?,
        content: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use waypoint_types::models::Role;

    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn message(conversation_id: Uuid, role: Role, content: &str) -> NewMessage {
        NewMessage {
            conversation_id,
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn created_conversation_can_be_fetched() {
        let db = db();
        let created = db.create_conversation(NewConversation::new(Some("라오스 봉사"))).unwrap();

        let fetched = db.get_conversation(&created.id).unwrap().unwrap();
        assert_eq!(fetched.title, "라오스 봉사");
        assert_eq!(fetched, created);
    }

    #[test]
    fn unknown_conversation_is_none() {
        assert!(db().get_conversation(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn messages_keep_insertion_order() {
        let db = db();
        let conv = db.create_conversation(NewConversation::new(Some("t"))).unwrap();

        let contents = ["first", "second", "third", "fourth"];
        for (i, content) in contents.iter().enumerate() {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            db.create_message(message(conv.id, role, content)).unwrap();
        }

        let listed: Vec<String> = db
            .list_messages(&conv.id)
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(listed, contents);
    }

    #[test]
    fn created_message_matches_listed() {
        let db = db();
        let conv = db.create_conversation(NewConversation::new(Some("t"))).unwrap();
        let created = db.create_message(message(conv.id, Role::User, "hello")).unwrap();

        let listed = db.list_messages(&conv.id).unwrap();
        assert_eq!(listed, [created]);
    }

    #[test]
    fn transcript_order_ignores_clock_steps() {
        let db = db();
        let conv = db.create_conversation(NewConversation::new(Some("t"))).unwrap();
        db.create_message(message(conv.id, Role::User, "prompt")).unwrap();

        // A reply stamped earlier than its prompt, as after a clock step back.
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (id, conversation_id, role, content, timestamp)
                 VALUES (?1, ?2, 'assistant', 'reply', '2000-01-01T00:00:00.000000Z')",
                [Uuid::new_v4().to_string(), conv.id.to_string()],
            )?;
            Ok(())
        })
        .unwrap();

        let listed: Vec<String> = db.list_messages(&conv.id).unwrap().into_iter().map(|m| m.content).collect();
        assert_eq!(listed, ["prompt", "reply"]);
    }

    #[test]
    fn message_for_unknown_conversation_is_rejected() {
        let err = db()
            .create_message(message(Uuid::new_v4(), Role::User, "hello"))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn appending_message_bumps_updated_at() {
        let db = db();
        let conv = db.create_conversation(NewConversation::new(Some("t"))).unwrap();
        let msg = db.create_message(message(conv.id, Role::User, "hello")).unwrap();

        let fetched = db.get_conversation(&conv.id).unwrap().unwrap();
        assert_eq!(fetched.updated_at, msg.timestamp);
        assert!(fetched.updated_at >= conv.created_at);
        assert_eq!(fetched.created_at, conv.created_at);
    }

    #[test]
    fn delete_cascades_to_messages() {
        let db = db();
        let conv = db.create_conversation(NewConversation::new(Some("t"))).unwrap();
        db.create_message(message(conv.id, Role::User, "hello")).unwrap();

        assert!(db.delete_conversation(&conv.id).unwrap());
        assert!(!db.delete_conversation(&conv.id).unwrap());
        assert!(db.get_conversation(&conv.id).unwrap().is_none());
        assert!(db.list_messages(&conv.id).unwrap().is_empty());

        let orphans: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM messages", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn list_puts_recently_active_first() {
        let db = db();
        let older = db.create_conversation(NewConversation::new(Some("older"))).unwrap();
        let newer = db.create_conversation(NewConversation::new(Some("newer"))).unwrap();

        let titles: Vec<String> = db.list_conversations().unwrap().into_iter().map(|c| c.title).collect();
        assert_eq!(titles, ["newer", "older"]);

        std::thread::sleep(std::time::Duration::from_millis(2));
        db.create_message(message(older.id, Role::User, "bump")).unwrap();
        let ids: Vec<Uuid> = db.list_conversations().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, [older.id, newer.id]);
    }

    #[test]
    fn reopening_file_keeps_records() {
        let path = std::env::temp_dir().join(format!("waypoint_db_test_{}.db", Uuid::new_v4()));
        let id = {
            let db = Database::open(&path).unwrap();
            db.create_conversation(NewConversation::new(Some("persisted"))).unwrap().id
        };

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_conversation(&id).unwrap().unwrap().title, "persisted");

        drop(db);
        let _ = std::fs::remove_file(&path);
    }
}
