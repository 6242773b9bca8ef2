//! [`Query`] collection related to multiple [`Estate`]s.

use common::operations::By;

use crate::{domain::Estate, read::estate::list::Filter};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`Estate`]s passing a [`Filter`], oldest first.
pub type List = DatabaseQuery<By<Vec<Estate>, Filter>>;

#[cfg(test)]
mod spec {
    use crate::{
        command::test,
        domain::{estate, Estate},
        infra::database::Memory,
        read::estate::list::Filter,
        Query as _, Service,
    };

    use super::List;

    fn ids(estates: &[Estate]) -> Vec<estate::Id> {
        estates.iter().map(|e| e.id).collect()
    }

    async fn list(
        service: &Service<Memory>,
        city: Option<&str>,
    ) -> Vec<Estate> {
        service
            .execute(List::by(Filter {
                city: city.map(|c| estate::City::new(c).unwrap()),
            }))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn lists_all_without_city() {
        let (service, db) = test::service();
        let first = test::estate(&db, "Prishtina");
        let second = test::estate(&db, "Peja");

        let estates = list(&service, None).await;

        assert_eq!(ids(&estates), [first.id, second.id]);
    }

    #[tokio::test]
    async fn filters_by_exact_city_in_order() {
        let (service, db) = test::service();
        let loft = test::estate(&db, "Prishtina");
        _ = test::estate(&db, "Prizren");
        let studio = test::estate(&db, "Prishtina");

        let estates = list(&service, Some("Prishtina")).await;

        assert_eq!(ids(&estates), [loft.id, studio.id]);
    }

    #[tokio::test]
    async fn matches_city_case_sensitively() {
        let (service, db) = test::service();
        _ = test::estate(&db, "Prishtina");

        assert!(list(&service, Some("prishtina")).await.is_empty());
        assert!(list(&service, Some("Prish")).await.is_empty());
    }

    #[tokio::test]
    async fn yields_empty_list_without_matches() {
        let (service, db) = test::service();
        _ = test::estate(&db, "Peja");

        assert!(list(&service, Some("Gjakova")).await.is_empty());
    }
}
