//! Larder - Embedded JSON-File Key-Value Store
//! Interactive shell over a single store instance, for poking at
//! a store file from the command line.

use std::io::{self, BufRead, Write};

use larder::store::Larder;

fn main() {
    env_logger::init();

    println!();
    println!("  ╔═══════════════════════════════════════════╗");
    println!("  ║            LARDER Key-Value Store         ║");
    println!("  ║       JSON-File Backed Store v1.0.0       ║");
    println!("  ╚═══════════════════════════════════════════╝");
    println!();
    println!("  Commands:");
    println!("    set <key> <value>  - Store a key-value pair");
    println!("    get <key>          - Retrieve a value by key");
    println!("    del <key>          - Delete a key");
    println!("    keys               - List all keys");
    println!("    query <pattern>    - Match keys (use * for wildcards)");
    println!("    load <path>        - Replace contents from a file");
    println!("    save <path>        - Write contents to a file");
    println!("    info               - Show store statistics");
    println!("    exit               - Quit");
    println!();

    let store = Larder::new();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("larder> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break; // EOF
        }

        let parts: Vec<&str> = line.trim().split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "set" | "put" => {
                if parts.len() < 3 {
                    println!("  Usage: set <key> <value>");
                    continue;
                }
                let value = parts[2..].join(" ");
                match store.set(parts[1], &value) {
                    Ok(()) => println!("  OK"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "get" => {
                if parts.len() < 2 {
                    println!("  Usage: get <key>");
                    continue;
                }
                match store.get_raw(parts[1]) {
                    Ok(payload) => println!("  {}", payload),
                    Err(e) => println!("  {}", e),
                }
            }
            "del" | "delete" => {
                if parts.len() < 2 {
                    println!("  Usage: del <key>");
                    continue;
                }
                store.delete(parts[1]);
                println!("  OK (deleted)");
            }
            "keys" | "list" => {
                let keys = store.keys();
                if keys.is_empty() {
                    println!("  (empty)");
                } else {
                    for key in &keys {
                        println!("  {}", key);
                    }
                    println!("  ({} keys)", keys.len());
                }
            }
            "query" => {
                if parts.len() < 2 {
                    println!("  Usage: query <pattern>");
                    continue;
                }
                match store.query(parts[1]) {
                    Ok(hits) => {
                        for (key, payload) in &hits {
                            println!("  {} -> {}", key, payload);
                        }
                        println!("  ({} matches)", hits.len());
                    }
                    Err(e) => println!("  {}", e),
                }
            }
            "load" => {
                if parts.len() < 2 {
                    println!("  Usage: load <path>");
                    continue;
                }
                match store.load(parts[1]) {
                    Ok(()) => println!("  OK ({} entries)", store.len()),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "save" => {
                if parts.len() < 2 {
                    println!("  Usage: save <path>");
                    continue;
                }
                match store.save_to(parts[1]) {
                    Ok(()) => println!("  OK"),
                    Err(e) => println!("  ERROR: {}", e),
                }
            }
            "info" | "stats" => {
                println!("  Entries: {}", store.len());
                println!("{}", store.metrics().report());
            }
            "exit" | "quit" | "q" => {
                println!("  Closing the larder...");
                break;
            }
            _ => {
                println!("  Unknown command: '{}'. Type 'exit' to quit.", parts[0]);
            }
        }
    }
}
