use iced::Event;
use std::time::Instant;

#[derive(Clone, Debug)]
pub enum Message {
    PollTick(Instant),
    FrameTick(Instant),
    NextPage,
    PreviousPage,
    Play(String),
    ExitPlayback,
    EventOccurred(Event),
}
