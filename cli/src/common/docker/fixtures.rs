//! Canned runtime output shared by the docker module tests.
#![allow(dead_code)]

use super::connect::Runtime;
use crate::common::process::testing::{ok, ScriptedRunner};
use std::sync::Arc;

pub const IMAGES_ARGS: [&str; 3] = ["images", "--digests", "--no-trunc"];
pub const CONTAINERS_ARGS: [&str; 4] = ["container", "ls", "--all", "--no-trunc"];

pub const DIGEST_OLD: &str = "sha256:218bb51abbd1864df8be26166f847547b3851a89999ca7bfceb85ca9b5d2e95d";
pub const DIGEST_NEW: &str = "sha256:c9cf959fd83770dfdefd8fb42cfef0761432af36a764c077aed54bbc5bb25368";
pub const LOCAL_OLD: &str = "sha256:bf40b7bc7a11b43785755d3c5f23dee03b08e988b327a2f10b22d01d5dc5259d";
pub const LOCAL_NEW: &str = "sha256:e4c58958181a5925816faa528ce959e487632f4cfd192f8132f71b32df2744b4";
pub const LOCAL_DANGLING: &str = "sha256:0d7a3d6a1a7ca9b1b9a5b8cbe0c3e0b6f4d7a9a2b3c4d5e6f708192a3b4c5d6e";

pub const CONTAINER_1: &str = "a6269652d8c38a31ed1256f81970d5070fd1d9050a8ac6304f255f05b4ed1b76";
pub const CONTAINER_2: &str = "5e57ddd38731cb96bd71da445c3fcfd952d5863c90ff9db4eefb335834308097";
pub const CONTAINER_3: &str = "9b1e4c2f7d3a8e6b5c0f1a2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2f";

pub fn runtime_with(runner: ScriptedRunner) -> (Runtime, Arc<ScriptedRunner>) {
    let runner = Arc::new(runner);
    (Runtime::new("docker", runner.clone()), runner)
}

/// `images --digests --no-trunc` with the old, new and a dangling image.
pub fn image_listing() -> String {
    image_listing_of(&[
        ("ubuntu", "<none>", DIGEST_OLD, LOCAL_OLD, "4 weeks ago", "72.8MB"),
        ("ubuntu", "latest", DIGEST_NEW, LOCAL_NEW, "4 weeks ago", "77.8MB"),
        ("ubuntu", "<none>", "<none>", LOCAL_DANGLING, "2 months ago", "72.7MB"),
    ])
}

pub fn image_listing_of(images: &[(&str, &str, &str, &str, &str, &str)]) -> String {
    let mut out = format!(
        "{:<13}{:<10}{:<74}{:<74}{:<14}{}\n",
        "REPOSITORY", "TAG", "DIGEST", "IMAGE ID", "CREATED", "SIZE"
    );
    for (repo, tag, digest, id, created, size) in images {
        out.push_str(&format!(
            "{:<13}{:<10}{:<74}{:<74}{:<14}{}\n",
            repo, tag, digest, id, created, size
        ));
    }
    out
}

/// `container ls --all --no-trunc`: containers 1 and 3 on the new image, 2 on the old one.
pub fn container_listing() -> String {
    let old_image = format!("ubuntu@{}", DIGEST_OLD);
    let new_image = format!("ubuntu@{}", DIGEST_NEW);
    container_listing_of(&[
        (CONTAINER_1, "ubuntu:latest", "\"sleep infinity\"", "5 seconds ago", "Up 3 seconds", "", "eager_pike"),
        (
            CONTAINER_2,
            old_image.as_str(),
            "\"bash\"",
            "11 minutes ago",
            "Exited (0) 10 minutes ago",
            "",
            "pensive_ishizaka",
        ),
        (
            CONTAINER_3,
            new_image.as_str(),
            "\"nginx -g 'daemon off;'\"",
            "2 hours ago",
            "Up 2 hours",
            "0.0.0.0:8080->80/tcp",
            "web",
        ),
    ])
}

pub fn container_listing_of(containers: &[(&str, &str, &str, &str, &str, &str, &str)]) -> String {
    let line = |f: [&str; 7]| {
        format!(
            "{:<67}{:<82}{:<28}{:<17}{:<28}{:<23}{}\n",
            f[0], f[1], f[2], f[3], f[4], f[5], f[6]
        )
    };
    let mut out = line(["CONTAINER ID", "IMAGE", "COMMAND", "CREATED", "STATUS", "PORTS", "NAMES"]);
    for (id, image, command, created, status, ports, names) in containers {
        out.push_str(&line([*id, *image, *command, *created, *status, *ports, *names]));
    }
    out
}

/// `container inspect` output naming `local_id` as the container's image.
pub fn inspect_json(container_id: &str, local_id: &str) -> String {
    format!(
        r#"[{{"Id": "{}", "Image": "{}", "State": {{"Status": "running", "Running": true}}, "Config": {{"Image": "ubuntu"}}}}]"#,
        container_id, local_id
    )
}

/// Runner that answers both listings and inspects containers 1/3 as new, 2 as old.
pub fn standard_runner() -> ScriptedRunner {
    ScriptedRunner::new()
        .on(&IMAGES_ARGS, ok(&image_listing()))
        .on(&CONTAINERS_ARGS, ok(&container_listing()))
        .on(&["container", "inspect", CONTAINER_1], ok(&inspect_json(CONTAINER_1, LOCAL_NEW)))
        .on(&["container", "inspect", CONTAINER_2], ok(&inspect_json(CONTAINER_2, LOCAL_OLD)))
        .on(&["container", "inspect", CONTAINER_3], ok(&inspect_json(CONTAINER_3, LOCAL_NEW)))
}
