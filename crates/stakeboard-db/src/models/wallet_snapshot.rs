use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schema::wallet_snapshots;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = wallet_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WalletSnapshot {
    pub id: i32,
    pub wallet_address: String,
    pub protocol: String,
    pub staked_amount: Decimal,
    pub rewards: Decimal,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Insertable)]
#[diesel(table_name = wallet_snapshots)]
pub struct NewWalletSnapshot {
    pub wallet_address: String,
    pub protocol: String,
    pub staked_amount: Decimal,
    pub rewards: Decimal,
    pub recorded_at: DateTime<Utc>,
}

impl WalletSnapshot {
    /// Append a snapshot. Snapshots are never updated once written.
    pub fn create(new_snapshot: &NewWalletSnapshot, conn: &mut diesel::PgConnection) -> QueryResult<Self> {
        diesel::insert_into(wallet_snapshots::table)
            .values(new_snapshot)
            .get_result(conn)
    }

    /// All snapshots of a wallet, oldest first
    pub fn find_by_wallet(
        wallet_address: &str,
        conn: &mut diesel::PgConnection,
    ) -> QueryResult<Vec<Self>> {
        wallet_snapshots::table
            .filter(wallet_snapshots::wallet_address.eq(wallet_address))
            .order((wallet_snapshots::recorded_at.asc(), wallet_snapshots::id.asc()))
            .load(conn)
    }
}
