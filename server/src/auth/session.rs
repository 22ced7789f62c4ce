use chrono::{Duration, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};

use super::crypto::{generate_token, hash_token};

/// Sessions expire; the original kept them forever, which was a gap, not
/// a feature.
const SESSION_TTL_DAYS: i64 = 30;

pub fn create_session(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Resolve a bearer token to its user. Every failure mode (no pool
/// connection, unknown token, expired session) collapses to `None`; the
/// caller maps that to the shared 403.
pub fn get_user_from_token(pool: &DbPool, token: &str) -> Option<User> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(User::as_select())
        .first(&mut conn)
        .ok()
}

/// Idempotent delete: destroying an already-gone session still succeeds.
pub fn destroy_session(conn: &mut PgConnection, token: &str) -> Result<(), diesel::result::Error> {
    diesel::delete(sessions::table.filter(sessions::token_hash.eq(hash_token(token))))
        .execute(conn)?;
    Ok(())
}
