//! [`ContactMessage`]-related [`Database`] implementations.

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::ContactMessage,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Insert<ContactMessage>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(message): Insert<ContactMessage>,
    ) -> Result<Self::Ok, Self::Err> {
        let ContactMessage {
            id,
            sender_id,
            estate_id,
            content,
            created_at,
        } = message;

        const SQL: &str = "\
            INSERT INTO contact_messages (\
                id, sender_id, estate_id, content, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, $4::TEXT, $5::TIMESTAMPTZ\
            )";
        self.exec(SQL, &[&id, &sender_id, &estate_id, &content, &created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
