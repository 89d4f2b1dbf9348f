//! Shared fixtures: an in-memory copy of the template repository

#![allow(dead_code, reason = "Each test binary uses a different subset")]
#![expect(clippy::unwrap_used, reason = "This is a test module")]

use gwi::config::template::CANONICAL_REPOSITORY;
use gwi::config::{
    Configuration, Identity, InferredOptions, PackageManager, TemplateSource, Toggles,
    UserOptions,
};
use gwi::system::MockSystem;
use std::path::PathBuf;

pub const WORK_DIR: &str = "/work";
pub const PROJECT_DIR: &str = "/work/my-lib";

pub const TEMPLATE_MANIFEST: &str = r#"{
  "name": "gwi",
  "version": "2.3.0",
  "description": "Interactive CLI for creating new JS repositories",
  "main": "index.js",
  "bin": {
    "gwi": "./bin/gwi.js"
  },
  "scripts": {
    "lint": "eslint .",
    "start": "node ./bin/gwi.js",
    "test": "npm run lint && jest"
  },
  "repository": "github:iamnapo/gwi",
  "author": {
    "name": "Napoleon-Christos Oikonomou",
    "email": "napoleonoikon@gmail.com",
    "url": "https://iamnapo.me"
  },
  "license": "MIT",
  "keywords": [
    "cli",
    "boilerplate"
  ],
  "dependencies": {
    "chalk": "^2.4.2",
    "execa": "^1.0.0"
  },
  "devDependencies": {
    "ava": "^2.0.0",
    "eslint": "^5.16.0",
    "eslint-config-iamnapo": "^1.0.0",
    "husky": "^2.3.0",
    "jest": "^24.8.0",
    "nyc": "^14.1.1"
  }
}
"#;

pub const TEMPLATE_README: &str = "# gwi

[![Build Status](https://travis-ci.com/iamnapo/gwi.svg)](https://travis-ci.com/iamnapo/gwi) [![npm](https://img.shields.io/npm/v/gwi.svg)](https://www.npmjs.com/package/gwi) [![License](https://img.shields.io/badge/license-MIT-blue.svg)](LICENSE) [![GitHub stars](https://img.shields.io/github/stars/iamnapo/gwi.svg)](https://github.com/iamnapo/gwi)

> Interactive CLI for creating new JS repositories

## Install

```sh
$ npm i -g gwi
```

## Usage

![Usage](usage.gif)

## Alternatives

Run `npx gwi` without installing.

## License

MIT \u{a9} [Napoleon-Christos Oikonomou](https://iamnapo.me)
";

pub const TEMPLATE_LICENSE: &str = "MIT License

Copyright (c) 2019 Napoleon-Christos Oikonomou <napoleonoikon@gmail.com> (iamnapo.me)

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files.
";

pub const TEMPLATE_TRAVIS: &str = "language: node_js
node_js:
  - node
script: npm test
after_success:
  - npx codecov
";

/// A mock filesystem holding a freshly cloned template at `/work/my-lib`
pub fn template_system() -> MockSystem {
    let file = |name: &str| format!("{PROJECT_DIR}/{name}");

    MockSystem::new()
        .with_current_dir(WORK_DIR)
        .unwrap()
        .with_file(file("package.json"), TEMPLATE_MANIFEST.as_bytes())
        .unwrap()
        .with_file(file("README.md"), TEMPLATE_README.as_bytes())
        .unwrap()
        .with_file(file("LICENSE"), TEMPLATE_LICENSE.as_bytes())
        .unwrap()
        .with_file(file(".travis.yml"), TEMPLATE_TRAVIS.as_bytes())
        .unwrap()
        .with_file(file("index.js"), b"module.exports = () => {};\n")
        .unwrap()
        .with_file(file("bin/gwi.js"), b"#!/usr/bin/env node\n")
        .unwrap()
        .with_file(file("src/args.js"), b"// args\n")
        .unwrap()
        .with_file(file("src/tasks.js"), b"// tasks\n")
        .unwrap()
        .with_file(file("tests/unit.test.js"), b"// old tests\n")
        .unwrap()
        .with_file(file("tests/fixtures/data.json"), b"{}\n")
        .unwrap()
        .with_file(file(".npmignore"), b"tests\n")
        .unwrap()
        .with_file(file("usage.gif"), &[0x47, 0x49, 0x46, 0x38])
        .unwrap()
        .with_file(file("yarn.lock"), b"# yarn lockfile v1\n")
        .unwrap()
        .with_file(file(".github/workflows/publish.yml"), b"name: publish\n")
        .unwrap()
        .with_file(file(".git/HEAD"), b"ref: refs/heads/master\n")
        .unwrap()
}

pub fn jane() -> Identity {
    Identity {
        full_name: "Jane Doe".to_owned(),
        email: "jane@example.com".to_owned(),
    }
}

pub const ALL_ON: Toggles = Toggles {
    ci: true,
    lint: true,
    install: true,
};

/// Build a configuration for `my-lib` in `/work`
pub fn config_with(
    username: &str,
    identity: Identity,
    toggles: Toggles,
    package_manager: PackageManager,
) -> Configuration {
    Configuration::from_parts(
        UserOptions {
            project_name: "my-lib".to_owned(),
            description: "does things".to_owned(),
            package_manager,
            toggles,
            starter_version: "2.3.0".to_owned(),
        },
        InferredOptions {
            identity,
            username: username.to_owned(),
            template: TemplateSource {
                repository: CANONICAL_REPOSITORY.to_owned(),
                branch: "v2.3.0".to_owned(),
            },
            working_directory: PathBuf::from(WORK_DIR),
        },
    )
}

/// Jane's configuration with every toggle on and npm
pub fn default_config() -> Configuration {
    config_with("janedoe", jane(), ALL_ON, PackageManager::Npm)
}
