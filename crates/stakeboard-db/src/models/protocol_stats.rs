use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schema::protocol_stats;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = protocol_stats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProtocolStatsRecord {
    pub id: i32,
    pub protocol_name: String,
    pub current_apy: Decimal,
    pub tvl: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = protocol_stats)]
pub struct NewProtocolStats {
    pub protocol_name: String,
    pub current_apy: Decimal,
    pub tvl: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl ProtocolStatsRecord {
    /// Insert the stats of a protocol, or overwrite its existing row
    pub fn upsert(new_stats: &NewProtocolStats, conn: &mut diesel::PgConnection) -> QueryResult<Self> {
        use diesel::pg::upsert::excluded;

        diesel::insert_into(protocol_stats::table)
            .values(new_stats)
            .on_conflict(protocol_stats::protocol_name)
            .do_update()
            .set((
                protocol_stats::current_apy.eq(excluded(protocol_stats::current_apy)),
                protocol_stats::tvl.eq(excluded(protocol_stats::tvl)),
                protocol_stats::updated_at.eq(excluded(protocol_stats::updated_at)),
            ))
            .get_result(conn)
    }

    /// All protocol rows, ordered by protocol name
    pub fn find_all(conn: &mut diesel::PgConnection) -> QueryResult<Vec<Self>> {
        protocol_stats::table
            .order(protocol_stats::protocol_name.asc())
            .load(conn)
    }
}
