//! The fixed outbound script: three literal payloads, one second apart.

use std::time::Duration;

use tokio::time::sleep;

use crate::error::WriteError;
use crate::session::Session;

/// One scripted step: a payload to write, then a pause.
pub struct Step {
    pub payload: &'static [u8],
    pub pause: Duration,
}

/// The `^` and `$` bytes are only meaningful to the server under test;
/// nothing here parses them.
pub const SCRIPT: [Step; 3] = [
    Step {
        payload: b"foo^1234$jo",
        pause: Duration::from_secs(1),
    },
    Step {
        payload: b"sdfsdfsdfsdf^a",
        pause: Duration::from_secs(1),
    },
    Step {
        payload: b"fkfkf0000$dfk^$sdf^a$^kk$",
        pause: Duration::from_secs(1),
    },
];

/// Plays the script against an open session: write, pause, repeat. A failed
/// write is not retried; it propagates to the caller.
pub async fn run(session: &mut Session) -> Result<(), WriteError> {
    for step in &SCRIPT {
        session.send(step.payload).await?;
        sleep(step.pause).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SCRIPT;

    #[test]
    fn payloads_concatenate_to_the_fixed_bytes() {
        let all: Vec<u8> = SCRIPT
            .iter()
            .flat_map(|step| step.payload.iter().copied())
            .collect();
        assert_eq!(
            all,
            b"foo^1234$josdfsdfsdfsdf^afkfkf0000$dfk^$sdf^a$^kk$".to_vec()
        );
    }

    #[test]
    fn every_step_pauses_one_second() {
        assert!(SCRIPT
            .iter()
            .all(|step| step.pause == Duration::from_secs(1)));
    }
}
