// src/app/submit_gate.rs

// 結果送信の「一回だけ」を守る門番だよ！🚪
// 送信中フラグ (in_flight) が立ってる間は二回目を通さない。
// 失敗したらフラグを下ろして、ユーザーがもう一回押せるようにする。

use crate::error::SessionError;

#[derive(Debug, Default)]
pub struct SubmitGate {
    in_flight: bool,
    completed: bool,
    attempts: u32,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信を始める。通ったら in_flight になる。
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.completed {
            return Err(SessionError::AlreadySubmitted);
        }
        if self.in_flight {
            return Err(SessionError::SubmissionInFlight);
        }
        self.in_flight = true;
        self.attempts += 1;
        Ok(())
    }

    /// 送信が終わった (成功でも失敗でも) 。
    pub fn finish(&mut self, succeeded: bool) {
        self.in_flight = false;
        if succeeded {
            self.completed = true;
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// 実際にリクエストを出した回数。
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
