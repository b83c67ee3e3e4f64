use sqlx::{FromRow, SqlitePool};

use crate::models::{Room, RoomPayload, weekdays};

#[derive(Debug, FromRow)]
struct RoomRow {
    id: i64,
    unidade: String,
    curso: String,
    periodo: String,
    disciplina: String,
    docente: String,
    dias_semana: Option<String>,
    turno: String,
    sala_aula: String,
    status: bool,
    created_at: String,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            unidade: row.unidade,
            curso: row.curso,
            periodo: row.periodo,
            disciplina: row.disciplina,
            docente: row.docente,
            dias_semana: weekdays::normalize(row.dias_semana.as_deref()),
            turno: row.turno,
            sala_aula: row.sala_aula,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

pub async fn fetch_rooms(db: &SqlitePool) -> Result<Vec<Room>, sqlx::Error> {
    let rows = sqlx::query_as::<_, RoomRow>(
        r#"
        SELECT id, unidade, curso, periodo, disciplina, docente,
               dias_semana, turno, sala_aula, status, created_at
        FROM rooms
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(Room::from).collect())
}

pub async fn find_room_by_id(db: &SqlitePool, id: i64) -> Result<Option<Room>, sqlx::Error> {
    let row = sqlx::query_as::<_, RoomRow>(
        "SELECT id, unidade, curso, periodo, disciplina, docente, dias_semana, turno, sala_aula, status, created_at FROM rooms WHERE id = ?"
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(row.map(Room::from))
}

/// Returns the id assigned by the database.
pub async fn insert_room(db: &SqlitePool, req: &RoomPayload) -> Result<i64, sqlx::Error> {
    let dias_semana = weekdays::encode(&req.dias_semana);

    let result = sqlx::query(
        r#"
        INSERT INTO rooms
            (unidade, curso, periodo, disciplina, docente, dias_semana, turno, sala_aula, status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&req.unidade)
    .bind(&req.curso)
    .bind(&req.periodo)
    .bind(&req.disciplina)
    .bind(&req.docente)
    .bind(dias_semana)
    .bind(&req.turno)
    .bind(&req.sala_aula)
    .bind(req.status_or_default())
    .execute(db)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrites every field. Returns the number of rows touched; callers do not
/// treat zero as an error.
pub async fn update_room(db: &SqlitePool, id: i64, req: &RoomPayload) -> Result<u64, sqlx::Error> {
    let dias_semana = weekdays::encode(&req.dias_semana);

    let result = sqlx::query(
        r#"
        UPDATE rooms
        SET unidade = ?1,
            curso = ?2,
            periodo = ?3,
            disciplina = ?4,
            docente = ?5,
            dias_semana = ?6,
            turno = ?7,
            sala_aula = ?8,
            status = ?9
        WHERE id = ?10
        "#,
    )
    .bind(&req.unidade)
    .bind(&req.curso)
    .bind(&req.periodo)
    .bind(&req.disciplina)
    .bind(&req.docente)
    .bind(dias_semana)
    .bind(&req.turno)
    .bind(&req.sala_aula)
    .bind(req.status_or_default())
    .bind(id)
    .execute(db)
    .await?;

    Ok(result.rows_affected())
}

pub async fn update_room_status(db: &SqlitePool, id: i64, status: bool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE rooms SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_room(db: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM rooms WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected())
}
