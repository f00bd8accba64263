use mockall::mock;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use schedule_mailbox_rs::{
  ActorPath, ActorRef, DeadLettersMessageQueue, Envelope, Message, MessageQueueBehavior, MessageQueueSize,
  MessageQueueWriterBehavior, PriorityClass, ScheduleCommand, SchedulePriorityMessageQueue,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[ctor::ctor]
fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

mock! {
  pub DeadLetterSink {}

  impl MessageQueueBehavior for DeadLetterSink {
    fn number_of_messages(&self) -> MessageQueueSize;
    fn has_messages(&self) -> bool;
  }

  impl MessageQueueWriterBehavior for DeadLetterSink {
    fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> anyhow::Result<()>;
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Tick {
  producer: usize,
  index: usize,
}

impl Message for Tick {}

fn secs(n: u64) -> Duration {
  Duration::from_secs(n)
}

fn scheduled_commands() -> Vec<ScheduleCommand> {
  vec![
    ScheduleCommand::new(secs(5), "Message A", false, false),
    ScheduleCommand::new(secs(13), "Message B", false, false),
    ScheduleCommand::new(secs(17), "Message C", false, false),
    ScheduleCommand::new(secs(2), "Message D", true, true),
    ScheduleCommand::new(secs(11), "Message E", false, false),
    ScheduleCommand::new(secs(4), "Message F", false, false),
    ScheduleCommand::new(secs(14), "Message F", true, false),
    ScheduleCommand::new(secs(4), "Message G", true, true),
    ScheduleCommand::new(secs(7), "Message H", false, false),
    ScheduleCommand::new(secs(7), "Message I", true, true),
    ScheduleCommand::new(secs(8), "Message J", false, false),
  ]
}

fn owner() -> ActorRef {
  ActorRef::of_local(ActorPath::of_root("test").with_child("user").with_child("GeneratorTestActor"))
}

fn label(envelope: &Envelope) -> String {
  match envelope.message_ref::<ScheduleCommand>() {
    Some(command) => format!("{}@{}", command.content(), command.timestamp().as_secs()),
    None => match envelope.message_ref::<Tick>() {
      Some(tick) => format!("tick {}:{}", tick.producer, tick.index),
      None => format!("{:?}", envelope.message()),
    },
  }
}

#[test]
fn dequeues_the_schedule_scenario_in_priority_order_for_any_arrival_order() {
  let expected = vec![
    "Message D@2",
    "Message G@4",
    "Message I@7",
    "Message F@14",
    "Message F@4",
    "Message A@5",
    "Message H@7",
    "Message J@8",
    "Message E@11",
    "Message B@13",
    "Message C@17",
  ];

  for seed in 0..32 {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut commands = scheduled_commands();
    commands.shuffle(&mut rng);

    let queue = SchedulePriorityMessageQueue::new();
    for command in commands {
      queue.enqueue(owner(), Envelope::new(command)).unwrap();
    }

    let mut actual = vec![];
    while let Some(envelope) = queue.try_dequeue() {
      actual.push(label(&envelope));
    }
    assert_eq!(actual, expected, "seed = {}", seed);
  }
}

#[test]
fn plain_messages_wait_behind_every_schedule_command() {
  let queue = SchedulePriorityMessageQueue::new();
  queue.enqueue(owner(), Envelope::new(Tick { producer: 0, index: 0 })).unwrap();
  queue
    .enqueue(owner(), Envelope::new(ScheduleCommand::of_external(secs(100), "late")))
    .unwrap();
  queue.enqueue(owner(), Envelope::new(Tick { producer: 0, index: 1 })).unwrap();
  queue
    .enqueue(owner(), Envelope::new(ScheduleCommand::of_self_re_execute(secs(1), "retry")))
    .unwrap();

  let order = std::iter::from_fn(|| queue.try_dequeue())
    .map(|envelope| label(&envelope))
    .collect::<Vec<_>>();

  assert_eq!(
    order,
    vec!["retry@1", "late@100", "tick 0:0", "tick 0:1"]
  );
}

#[test]
fn drain_to_delivers_everything_in_front_to_back_order() {
  let queue = SchedulePriorityMessageQueue::new();
  for command in scheduled_commands() {
    queue.enqueue(owner(), Envelope::new(command)).unwrap();
  }
  let expected = queue.snapshot().iter().map(label).collect::<Vec<_>>();

  let delivered = Arc::new(Mutex::new(vec![]));
  let mut sink = MockDeadLetterSink::new();
  let recorder = delivered.clone();
  sink.expect_enqueue().times(11).returning(move |receiver, envelope| {
    assert_eq!(receiver, owner());
    recorder.lock().unwrap().push(label(&envelope));
    Ok(())
  });

  let moved = queue.drain_to(owner(), &sink).unwrap();

  assert_eq!(moved, 11);
  assert_eq!(queue.count(), 0);
  assert!(!queue.has_messages());
  assert_eq!(*delivered.lock().unwrap(), expected);
}

#[test]
fn drain_to_keeps_delivering_after_a_sink_failure() {
  let queue = SchedulePriorityMessageQueue::new();
  for index in 0..3 {
    queue.enqueue(owner(), Envelope::new(Tick { producer: 0, index })).unwrap();
  }

  let mut sink = MockDeadLetterSink::new();
  sink.expect_enqueue().times(3).returning(|_, envelope| {
    match envelope.message_ref::<Tick>() {
      Some(Tick { index: 1, .. }) => Err(anyhow::anyhow!("sink rejected")),
      _ => Ok(()),
    }
  });

  let error = queue.drain_to(owner(), &sink).unwrap_err();

  assert_eq!(error.to_string(), "sink rejected");
  assert_eq!(queue.count(), 0);
}

#[test]
fn drain_to_may_re_enter_the_same_queue() {
  struct Requeue {
    queue: SchedulePriorityMessageQueue,
  }

  impl MessageQueueBehavior for Requeue {
    fn number_of_messages(&self) -> MessageQueueSize {
      MessageQueueSize::Limited(self.queue.count())
    }

    fn has_messages(&self) -> bool {
      false
    }
  }

  impl MessageQueueWriterBehavior for Requeue {
    fn enqueue(&self, receiver: ActorRef, envelope: Envelope) -> anyhow::Result<()> {
      self.queue.enqueue(receiver, envelope)
    }
  }

  let queue = SchedulePriorityMessageQueue::new();
  queue.enqueue(owner(), Envelope::new(Tick { producer: 0, index: 0 })).unwrap();
  queue.enqueue(owner(), Envelope::new(Tick { producer: 0, index: 1 })).unwrap();

  let sink = Requeue { queue: queue.clone() };
  assert_eq!(queue.drain_to(owner(), &sink).unwrap(), 2);
  assert_eq!(queue.count(), 2);
}

fn envelope_for(producer: usize, index: usize) -> Envelope {
  if index % 2 == 0 {
    Envelope::new(Tick { producer, index })
  } else {
    let content = format!("{}:{}", producer, index);
    Envelope::new(ScheduleCommand::new(
      secs((index % 7) as u64),
      &content,
      index % 3 != 0,
      index % 5 == 0,
    ))
  }
}

fn identity_of(envelope: &Envelope) -> (usize, usize) {
  match envelope.message_ref::<ScheduleCommand>() {
    Some(command) => {
      let mut parts = command.content().split(':').map(|part| part.parse::<usize>().unwrap());
      (parts.next().unwrap(), parts.next().unwrap())
    }
    None => {
      let tick = envelope.message_ref::<Tick>().unwrap();
      (tick.producer, tick.index)
    }
  }
}

/// Checks priority order across producers and arrival order within one producer.
fn assert_priority_order(envelopes: &[Envelope]) {
  for pair in envelopes.windows(2) {
    let (left, right) = (&pair[0], &pair[1]);
    match (left.schedule_attributes(), right.schedule_attributes()) {
      (Some(l), Some(r)) => {
        let key_l = (PriorityClass::of(&l), l.timestamp);
        let key_r = (PriorityClass::of(&r), r.timestamp);
        assert!(key_l <= key_r, "{:?} before {:?}", key_l, key_r);
        if key_l == key_r {
          let (lp, li) = identity_of(left);
          let (rp, ri) = identity_of(right);
          if lp == rp {
            assert!(li < ri);
          }
        }
      }
      (None, Some(_)) => panic!("a plain message was ordered before a schedule command"),
      (Some(_), None) => {}
      (None, None) => {
        let (lp, li) = identity_of(left);
        let (rp, ri) = identity_of(right);
        if lp == rp {
          assert!(li < ri);
        }
      }
    }
  }
}

#[test]
fn concurrent_producers_lose_and_duplicate_nothing() {
  const PRODUCERS: usize = 8;
  const MESSAGES_PER_PRODUCER: usize = 250;

  let queue = SchedulePriorityMessageQueue::new();
  crossbeam::scope(|scope| {
    for producer in 0..PRODUCERS {
      let queue = &queue;
      scope.spawn(move |_| {
        for index in 0..MESSAGES_PER_PRODUCER {
          queue.enqueue(owner(), envelope_for(producer, index)).unwrap();
        }
      });
    }
  })
  .unwrap();

  assert_eq!(queue.count(), PRODUCERS * MESSAGES_PER_PRODUCER);

  let dead_letters = DeadLettersMessageQueue::new();
  let receiver = dead_letters.subscribe();
  assert_eq!(
    queue.drain_to(owner(), &dead_letters).unwrap(),
    PRODUCERS * MESSAGES_PER_PRODUCER
  );
  let drained = receiver.try_iter().map(|letter| letter.into_envelope()).collect::<Vec<_>>();

  let identities = drained.iter().map(identity_of).collect::<HashSet<_>>();
  assert_eq!(drained.len(), PRODUCERS * MESSAGES_PER_PRODUCER);
  assert_eq!(identities.len(), PRODUCERS * MESSAGES_PER_PRODUCER);
  assert_priority_order(&drained);
}

#[test]
fn drain_racing_with_producers_drops_nothing() {
  const PRODUCERS: usize = 4;
  const MESSAGES_PER_PRODUCER: usize = 500;

  let queue = SchedulePriorityMessageQueue::new();
  let dead_letters = DeadLettersMessageQueue::new();
  let receiver = dead_letters.subscribe();

  crossbeam::scope(|scope| {
    for producer in 0..PRODUCERS {
      let queue = &queue;
      scope.spawn(move |_| {
        for index in 0..MESSAGES_PER_PRODUCER {
          queue.enqueue(owner(), envelope_for(producer, index)).unwrap();
        }
      });
    }
    let queue = &queue;
    let dead_letters = &dead_letters;
    scope.spawn(move |_| {
      for _ in 0..50 {
        queue.drain_to(owner(), dead_letters).unwrap();
        std::thread::yield_now();
      }
    });
  })
  .unwrap();
  queue.drain_to(owner(), &dead_letters).unwrap();

  let identities = receiver
    .try_iter()
    .map(|letter| identity_of(letter.envelope()))
    .collect::<Vec<_>>();
  let unique = identities.iter().copied().collect::<HashSet<_>>();
  assert_eq!(identities.len(), PRODUCERS * MESSAGES_PER_PRODUCER);
  assert_eq!(unique.len(), PRODUCERS * MESSAGES_PER_PRODUCER);
  assert_eq!(queue.count(), 0);
}
