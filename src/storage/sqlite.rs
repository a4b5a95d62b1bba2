// src/storage/sqlite.rs

//! SQLite persistence for program aggregates.
//!
//! Programs are upserted by `program_key`; each program's blocks, courses,
//! and constraints are fully replaced (deleted and reinserted) on every
//! run, inside one transaction per program so the delete/insert window is
//! never externally visible.

use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{BlockType, Program, RunReport};
use crate::utils::log;

/// Row counts currently stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub programs: usize,
    pub blocks: usize,
    pub courses: usize,
    pub constraints: usize,
}

/// SQLite-backed program store.
pub struct SqliteStore {
    conn: Connection,
    batch_size: usize,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema.
    pub fn open(path: impl AsRef<Path>, batch_size: usize) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn, batch_size)
    }

    /// Open an in-memory database (used by tests).
    pub fn open_in_memory(batch_size: usize) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, batch_size)
    }

    fn from_connection(conn: Connection, batch_size: usize) -> Result<Self> {
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let store = Self {
            conn,
            batch_size: batch_size.max(1),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS programs (
                program_key   TEXT PRIMARY KEY,
                name          TEXT NOT NULL,
                program_type  TEXT NOT NULL,
                faculty       TEXT,
                total_credits INTEGER,
                description   TEXT,
                ecalendar_url TEXT NOT NULL,
                updated_at    TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS blocks (
                block_key      TEXT PRIMARY KEY,
                program_key    TEXT NOT NULL
                               REFERENCES programs(program_key) ON DELETE CASCADE,
                title          TEXT NOT NULL,
                block_type     TEXT NOT NULL,
                group_name     TEXT,
                credits_needed INTEGER,
                courses_needed INTEGER,
                notes          TEXT,
                sort_order     INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_blocks_program ON blocks(program_key);

            CREATE TABLE IF NOT EXISTS courses (
                id          INTEGER PRIMARY KEY,
                block_key   TEXT NOT NULL
                            REFERENCES blocks(block_key) ON DELETE CASCADE,
                subject     TEXT NOT NULL,
                catalog     TEXT NOT NULL,
                title       TEXT,
                credits     INTEGER NOT NULL,
                is_required BOOLEAN NOT NULL,
                sort_order  INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_courses_block ON courses(block_key);

            CREATE TABLE IF NOT EXISTS constraints (
                id              INTEGER PRIMARY KEY,
                program_key     TEXT NOT NULL
                                REFERENCES programs(program_key) ON DELETE CASCADE,
                constraint_type TEXT NOT NULL,
                params          TEXT NOT NULL,
                source_text     TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_constraints_program ON constraints(program_key);
            ",
        )?;
        Ok(())
    }

    /// Upsert one program and fully replace its children.
    ///
    /// Returns the number of blocks and courses written.
    pub fn save_program(&self, program: &Program) -> Result<(usize, usize)> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO programs
             (program_key, name, program_type, faculty, total_credits,
              description, ecalendar_url, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))
             ON CONFLICT(program_key) DO UPDATE SET
                name          = excluded.name,
                program_type  = excluded.program_type,
                faculty       = excluded.faculty,
                total_credits = excluded.total_credits,
                description   = excluded.description,
                ecalendar_url = excluded.ecalendar_url,
                updated_at    = excluded.updated_at",
            rusqlite::params![
                program.program_key,
                program.name,
                program.program_type.as_str(),
                program.faculty,
                program.total_credits.map(|c| c as i64),
                program.description,
                program.ecalendar_url,
            ],
        )?;

        // Full replace: requirement structures change on a yearly cadence,
        // so delete-and-reinsert beats diffing. Courses go with their
        // blocks via the FK cascade.
        tx.execute(
            "DELETE FROM blocks WHERE program_key = ?1",
            [&program.program_key],
        )?;
        tx.execute(
            "DELETE FROM constraints WHERE program_key = ?1",
            [&program.program_key],
        )?;

        let mut block_count = 0;
        let mut course_count = 0;
        {
            let mut block_stmt = tx.prepare(
                "INSERT INTO blocks
                 (block_key, program_key, title, block_type, group_name,
                  credits_needed, courses_needed, notes, sort_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            let mut course_stmt = tx.prepare(
                "INSERT INTO courses
                 (block_key, subject, catalog, title, credits, is_required, sort_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;

            for chunk in program.blocks.chunks(self.batch_size) {
                for block in chunk {
                    block_stmt.execute(rusqlite::params![
                        block.block_key,
                        program.program_key,
                        block.title,
                        block.block_type.as_str(),
                        block.group_name,
                        block.credits_needed.map(|c| c as i64),
                        block.courses_needed.map(|c| c as i64),
                        block.notes,
                        block.sort_order as i64,
                    ])?;
                    block_count += 1;

                    for courses in block.courses.chunks(self.batch_size) {
                        for course in courses {
                            course_stmt.execute(rusqlite::params![
                                block.block_key,
                                course.subject,
                                course.catalog,
                                course.title,
                                course.credits as i64,
                                course.is_required,
                                course.sort_order as i64,
                            ])?;
                            course_count += 1;
                        }
                    }
                }
            }

            let mut constraint_stmt = tx.prepare(
                "INSERT INTO constraints
                 (program_key, constraint_type, params, source_text)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for constraint in &program.constraints {
                constraint_stmt.execute(rusqlite::params![
                    program.program_key,
                    constraint.constraint_type.as_str(),
                    serde_json::to_string(constraint)?,
                    constraint.source_text,
                ])?;
            }
        }

        tx.commit()?;
        Ok((block_count, course_count))
    }

    /// Persist every program, isolating per-program failures.
    ///
    /// Each failure is logged with its program_key and accumulated in the
    /// report; the batch continues.
    pub fn save_all(&self, programs: &[Program]) -> RunReport {
        let mut report = RunReport::new();
        for program in programs {
            match self.save_program(program) {
                Ok((blocks, courses)) => {
                    report.programs += 1;
                    report.blocks += blocks;
                    report.courses += courses;
                }
                Err(error) => {
                    log::warn(&format!(
                        "Failed to persist {}: {}",
                        program.program_key, error
                    ));
                    report.record_error(&program.program_key, error);
                }
            }
        }
        report
    }

    /// Row counts for the stats command.
    pub fn get_stats(&self) -> Result<StoreStats> {
        let count = |table: &str| -> Result<usize> {
            Ok(self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
        };
        Ok(StoreStats {
            programs: count("programs")?,
            blocks: count("blocks")?,
            courses: count("courses")?,
            constraints: count("constraints")?,
        })
    }

    /// Block types currently stored for one program, in sort order.
    /// Used by tests and the stats command.
    pub fn block_types(&self, program_key: &str) -> Result<Vec<BlockType>> {
        let mut stmt = self.conn.prepare(
            "SELECT block_type FROM blocks WHERE program_key = ?1 ORDER BY sort_order",
        )?;
        let types = stmt
            .query_map([program_key], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(types
            .iter()
            .filter_map(|s| BlockType::parse(s))
            .collect())
    }
}
