//! [`Estate`]-related [`Database`] implementations.

use common::{
    money::Currency,
    operations::{By, Insert, Lock, Select},
    Coordinates, Money,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{estate, Estate},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Builds an [`Estate`] out of an `estates` [`Row`].
///
/// # Panics
///
/// If the [`Row`] violates the invariants the table is written with.
fn from_row(row: &Row) -> Estate {
    let count = |column: &str| {
        u16::try_from(row.get::<_, i32>(column))
            .unwrap_or_else(|_| panic!("`{column}` overflow"))
    };

    Estate {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        price: estate::Price::new(Money {
            amount: row.get::<_, Decimal>("price_amount"),
            currency: row.get::<_, Currency>("price_currency"),
        })
        .expect("`price` is negative"),
        rating: row.get::<_, Option<i16>>("rating").map(|r| {
            u8::try_from(r)
                .ok()
                .and_then(estate::Rating::new)
                .expect("`rating` out of range")
        }),
        location: Coordinates::new(row.get("latitude"), row.get("longitude"))
            .expect("invalid `latitude` or `longitude`"),
        photos: estate::Photos::new(
            row.get::<_, Vec<String>>("photos")
                .into_iter()
                .map(|url| estate::PhotoUrl::new(url).expect("invalid photo"))
                .collect(),
        )
        .expect("`photos` is empty"),
        characteristics: estate::Characteristics {
            rooms: count("rooms"),
            bathrooms: count("bathrooms"),
            parking: row.get("parking"),
            balcony: row.get("balcony"),
        },
        lifestyle: estate::Lifestyle {
            smoking: row.get("smoking"),
            student_friendly: row.get("student_friendly"),
            family_friendly: row.get("family_friendly"),
            pets_allowed: row.get("pets_allowed"),
            age_restrictions: row
                .get::<_, Vec<String>>("age_restrictions")
                .into_iter()
                .map(|r| {
                    estate::AgeRestriction::new(r)
                        .expect("invalid age restriction")
                })
                .collect(),
        },
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Estate>, estate::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Estate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Estate>, estate::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, city, \
                   price_amount, price_currency, rating, \
                   latitude, longitude, photos, \
                   rooms, bathrooms, parking, balcony, \
                   smoking, student_friendly, family_friendly, \
                   pets_allowed, age_restrictions, \
                   created_at \
            FROM estates \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Estate>, read::estate::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Estate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Estate>, read::estate::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::estate::list::Filter { city } = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, city, \
                   price_amount, price_currency, rating, \
                   latitude, longitude, photos, \
                   rooms, bathrooms, parking, balcony, \
                   smoking, student_friendly, family_friendly, \
                   pets_allowed, age_restrictions, \
                   created_at \
            FROM estates \
            WHERE $1::VARCHAR IS NULL OR city = $1::VARCHAR \
            ORDER BY created_at ASC, id ASC";
        Ok(self
            .query(SQL, &[&city])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Estate>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(estate): Insert<Estate>,
    ) -> Result<Self::Ok, Self::Err> {
        let Estate {
            id,
            name,
            city,
            price,
            rating,
            location,
            photos,
            characteristics,
            lifestyle,
            created_at,
        } = estate;
        let price = price.money();
        let rating = rating.map(|r| i16::from(r.get()));
        let photos = photos
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>();
        let age_restrictions = lifestyle
            .age_restrictions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<String>>();

        const SQL: &str = "\
            INSERT INTO estates (\
                id, name, city, \
                price_amount, price_currency, rating, \
                latitude, longitude, photos, \
                rooms, bathrooms, parking, balcony, \
                smoking, student_friendly, family_friendly, \
                pets_allowed, age_restrictions, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::NUMERIC, $5::INT2, $6::INT2, \
                $7::FLOAT8, $8::FLOAT8, $9::TEXT[], \
                $10::INT4, $11::INT4, $12::BOOL, $13::BOOL, \
                $14::BOOL, $15::BOOL, $16::BOOL, \
                $17::BOOL, $18::TEXT[], \
                $19::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &city,
                &price.amount,
                &price.currency,
                &rating,
                &location.latitude(),
                &location.longitude(),
                &photos,
                &i32::from(characteristics.rooms),
                &i32::from(characteristics.bathrooms),
                &characteristics.parking,
                &characteristics.balcony,
                &lifestyle.smoking,
                &lifestyle.student_friendly,
                &lifestyle.family_friendly,
                &lifestyle.pets_allowed,
                &age_restrictions,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Estate, estate::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Estate, estate::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        // Holds until the surrounding transaction ends.
        const SQL: &str = "\
            SELECT id \
            FROM estates \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
