// Kennywood
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Entry point to the Kennywood service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use kennywood_api::db::init_schema;
use kennywood_api::serve;
use kennywood_core::db::Db;
use kennywood_core::db::postgres::{PostgresDb, PostgresOptions};
use kennywood_core::db::sqlite;
use kennywood_core::env::get_optional_var;
use kennywood_core::rest::BaseUrls;
use log::info;
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Port to listen on when `KENNYWOOD_PORT` is not set.
const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let port = get_optional_var::<u16>("KENNYWOOD", "PORT")?.unwrap_or(DEFAULT_PORT);
    let addr = (Ipv4Addr::LOCALHOST, port);

    let base_urls = BaseUrls::from_env("KENNYWOOD")?;

    let db: Arc<dyn Db + Send + Sync> = match get_optional_var::<String>("KENNYWOOD", "SQLITE")? {
        Some(conn_str) => {
            info!("Using SQLite database {}", conn_str);
            Arc::new(sqlite::connect(&conn_str).await?)
        }
        None => {
            let db_opts = PostgresOptions::from_env("PGSQL_PROD")?;
            Arc::new(PostgresDb::connect(db_opts)?)
        }
    };
    init_schema(&mut db.ex().await?).await?;

    let result = serve(addr, db.clone(), base_urls).await;
    db.close().await;
    result
}
