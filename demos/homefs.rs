//! An automounter for home directories.
//!
//! Mounted on `/home`, every `/home/<user>` becomes a symlink to that user's
//! real home directory the first time it is looked up. The root listing
//! shows only users that have been looked up so far.
//!
//! This demo has no mount transport; it drives the filesystem directly with
//! the user names given on the command line.
//!
//! Run with: `cargo run --example homefs -- root daemon nosuchuser`

use indexmap::IndexMap;
use routefs::*;
use std::io;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing_subscriber::EnvFilter;

const PASSWD: &str = "/etc/passwd";

/// Home directory of `user` according to the passwd database, if any.
fn home_of(passwd: &str, user: &str) -> io::Result<Option<String>> {
    let contents = std::fs::read_to_string(passwd)?;
    Ok(contents
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.split(':').collect::<Vec<_>>())
        .find(|fields| fields.first() == Some(&user))
        .and_then(|fields| fields.get(5).map(|home| home.to_string())))
}

/// Build the filesystem. Lookups are remembered in insertion order.
fn home_fs(passwd: &'static str) -> Result<RouteFs, FsError> {
    let cache: Arc<RwLock<IndexMap<String, String>>> = Arc::default();
    let listing = Arc::clone(&cache);

    RouteFs::builder()
        .handler("get_list", move |_| -> Result<Vec<String>, HandlerError> {
            let cache = listing.read().map_err(|e| e.to_string())?;
            Ok(cache.keys().cloned().collect())
        })
        .handler("get_user", move |p| -> Result<Option<Entry>, HandlerError> {
            let Some(user) = p.get("action") else {
                return Ok(None);
            };
            if let Some(home) = cache.read().map_err(|e| e.to_string())?.get(user) {
                return Ok(Some(Entry::symlink(home.as_str())));
            }
            let Some(home) = home_of(passwd, user)? else {
                return Ok(None);
            };
            tracing::info!(user, home = %home, "mounted home directory");
            cache
                .write()
                .map_err(|e| e.to_string())?
                .insert(user.to_string(), home.clone());
            Ok(Some(Entry::symlink(home)))
        })
        .route("", "get_list")
        .route(":action", "get_user")
        .build()
}

fn main() -> Result<(), FsError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let fs = home_fs(PASSWD)?;
    for user in std::env::args().skip(1) {
        let path = Path::new("/").join(&user);
        match fs.read_link(&path) {
            Ok(target) => println!("{} -> {target}", path.display()),
            Err(err) => println!("{}: {err}", path.display()),
        }
    }

    println!("/ contains: {:?}", fs.list(Path::new("/"))?);
    Ok(())
}
