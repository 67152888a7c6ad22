//! Unit tests for tau-reaction.

#[cfg(test)]
mod support {
    use std::cell::Cell;
    use std::rc::Rc;

    use rand::rngs::mock::StepRng;
    use tau_core::{Condition, NodeId, SharedRng};

    /// Condition whose contribution is set by hand between updates.
    pub struct Knob(pub Cell<f64>);

    impl Knob {
        pub fn new(value: f64) -> Rc<Knob> {
            Rc::new(Knob(Cell::new(value)))
        }
    }

    impl Condition for Knob {
        fn propensity_contribution(&self) -> f64 {
            self.0.get()
        }

        fn clone_on_new_node(&self, _node: NodeId) -> Rc<dyn Condition> {
            Rc::new(Knob(Cell::new(self.0.get())))
        }
    }

    /// Fixed contribution that counts how often it is read.
    pub struct Counted {
        value:     f64,
        pub reads: Cell<u32>,
    }

    impl Counted {
        pub fn new(value: f64) -> Rc<Counted> {
            Rc::new(Counted { value, reads: Cell::new(0) })
        }
    }

    impl Condition for Counted {
        fn propensity_contribution(&self) -> f64 {
            self.reads.set(self.reads.get() + 1);
            self.value
        }

        fn clone_on_new_node(&self, _node: NodeId) -> Rc<dyn Condition> {
            Counted::new(self.value)
        }
    }

    pub fn conds(knobs: &[&Rc<Knob>]) -> Vec<Rc<dyn Condition>> {
        knobs.iter().map(|k| Rc::clone(k) as Rc<dyn Condition>).collect()
    }

    /// Every uniform drawn from this stream is exactly 0.5.
    pub fn half() -> SharedRng {
        SharedRng::new(StepRng::new(1 << 63, 0))
    }

    pub fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }
}

#[cfg(test)]
mod gated {
    use std::f64::consts::LN_2;
    use std::rc::Rc;

    use proptest::prelude::*;
    use tau_core::{Condition, CoreError, NodeId, SharedRng, Time};
    use tau_distribution::{DiracComb, ExponentialTime, TimeDistribution, Transition, Trigger};

    use super::support::{Counted, Knob, close, conds, half};
    use crate::{PropensityGated, ReactionError};

    const NODE: NodeId = NodeId(0);

    fn exponential(rate: f64) -> TimeDistribution {
        ExponentialTime::new(rate, Time::ZERO, half()).unwrap().into()
    }

    #[test]
    fn zero_contribution_blocks() {
        let (zero, big) = (Knob::new(0.0), Knob::new(5.0));
        let mut r = PropensityGated::new(NODE, exponential(2.0), conds(&[&zero, &big]));
        assert_eq!(r.initialization_complete(Time::ZERO).unwrap(), Transition::Disabled);
        assert_eq!(r.tau().unwrap(), Time::INFINITE);
        assert_eq!(r.rate(), 0.0);
        assert!(!r.is_executable());
    }

    #[test]
    fn infinite_contribution_fires_now() {
        let (finite, inf) = (Knob::new(2.0), Knob::new(f64::INFINITY));
        let comb = DiracComb::new(Time::at(10.0), 1.0).unwrap().into();
        let mut r = PropensityGated::new(NODE, comb, conds(&[&finite, &inf]));
        let t = r.initialization_complete(Time::at(3.0)).unwrap();
        assert_eq!(t, Transition::Scheduled(Time::at(3.0)));
        assert_eq!(r.tau().unwrap(), Time::at(3.0));
        assert_eq!(r.rate(), f64::INFINITY);
    }

    #[test]
    fn zero_after_infinite_still_blocks() {
        let (inf, zero) = (Knob::new(f64::INFINITY), Knob::new(0.0));
        let mut r = PropensityGated::new(NODE, exponential(2.0), conds(&[&inf, &zero]));
        assert_eq!(r.initialization_complete(Time::at(3.0)).unwrap(), Transition::Disabled);
        assert_eq!(r.tau().unwrap(), Time::INFINITE);
        assert_eq!(r.rate(), 0.0);
    }

    #[test]
    fn invalid_contribution_after_infinite_fails() {
        let (inf, bad) = (Knob::new(f64::INFINITY), Knob::new(-2.0));
        let mut r = PropensityGated::new(NODE, exponential(2.0), conds(&[&inf, &bad]));
        assert!(matches!(
            r.initialization_complete(Time::ZERO),
            Err(ReactionError::Core(CoreError::InvalidPropensity { .. }))
        ));
    }

    #[test]
    fn conditions_read_once_per_update() {
        let counter = Counted::new(2.0);
        let list = vec![counter.clone() as Rc<dyn Condition>];
        let mut r = PropensityGated::new(NODE, exponential(1.0), list);
        r.initialization_complete(Time::ZERO).unwrap();
        assert_eq!(counter.reads.get(), 1);
        r.update(Time::ZERO, false).unwrap();
        assert_eq!(counter.reads.get(), 2);
        assert_eq!(r.rate(), 2.0);
    }

    #[test]
    fn rate_is_base_times_contributions() {
        let (a, b) = (Knob::new(3.0), Knob::new(0.5));
        let mut r = PropensityGated::new(NODE, exponential(2.0), conds(&[&a, &b]));
        assert_eq!(r.rate(), 2.0);
        r.initialization_complete(Time::ZERO).unwrap();
        assert_eq!(r.rate(), 3.0);
        assert!(close(r.tau().unwrap().as_f64(), LN_2 / 3.0));
    }

    #[test]
    fn reenabled_reaction_is_force_refreshed() {
        let knob = Knob::new(1.0);
        let comb = DiracComb::new(Time::ZERO, 1.0).unwrap().into();
        let mut r = PropensityGated::new(NODE, comb, conds(&[&knob]));
        assert_eq!(r.initialization_complete(Time::ZERO).unwrap(), Transition::Scheduled(Time::ZERO));
        assert_eq!(r.update(Time::ZERO, true).unwrap(), Transition::Scheduled(Time::at(1.0)));

        knob.0.set(0.0);
        assert_eq!(r.update(Time::at(0.5), false).unwrap(), Transition::Disabled);

        // Without the forced refresh the comb would still point at 1.0.
        knob.0.set(1.0);
        assert_eq!(r.update(Time::at(2.5), false).unwrap(), Transition::Scheduled(Time::at(3.5)));
        assert!(r.is_executable());
    }

    #[test]
    fn reenabled_exponential_draws_fresh() {
        let knob = Knob::new(1.0);
        let mut r = PropensityGated::new(NODE, exponential(2.0), conds(&[&knob]));
        r.initialization_complete(Time::ZERO).unwrap();

        knob.0.set(0.0);
        r.update(Time::at(0.1), false).unwrap();
        knob.0.set(1.0);
        let t = r.update(Time::at(1.0), false).unwrap().time();
        assert!(close(t.as_f64(), 1.0 + LN_2 / 2.0));
    }

    #[test]
    fn one_shot_is_not_force_refreshed() {
        let knob = Knob::new(0.0);
        let mut r = PropensityGated::new(NODE, Trigger::new(Time::at(5.0)).into(), conds(&[&knob]));
        assert_eq!(r.initialization_complete(Time::ZERO).unwrap(), Transition::Disabled);
        knob.0.set(1.0);
        assert_eq!(r.update(Time::at(1.0), false).unwrap(), Transition::Scheduled(Time::at(5.0)));
    }

    #[test]
    fn past_trigger_is_a_regression() {
        let mut r = PropensityGated::new(NODE, Trigger::new(Time::at(1.0)).into(), vec![]);
        let err = r.initialization_complete(Time::at(4.0)).unwrap_err();
        assert!(matches!(err, ReactionError::Distribution(_)));
    }

    #[test]
    fn uninitialized_access() {
        let mut r = PropensityGated::new(NodeId(4), exponential(1.0), vec![]);
        assert!(matches!(r.tau(), Err(ReactionError::UninitializedAccess { node: NodeId(4) })));
        assert!(matches!(
            r.update(Time::ZERO, false),
            Err(ReactionError::UninitializedAccess { .. })
        ));
    }

    #[test]
    fn markovian_only_adopts_exponential() {
        let comb: TimeDistribution = DiracComb::new(Time::ZERO, 1.0).unwrap().into();
        match PropensityGated::markovian(NODE, comb, vec![]) {
            Err(ReactionError::IncompatibleCloneTarget { reaction, distribution }) => {
                assert_eq!(reaction, "MarkovianReaction");
                assert_eq!(distribution, "DiracComb");
            }
            other => panic!("unexpected {other:?}"),
        }

        let r = PropensityGated::markovian(NODE, exponential(1.0), vec![]).unwrap();
        assert!(r.is_markovian());
        let comb = DiracComb::new(Time::ZERO, 1.0).unwrap().into();
        assert!(matches!(
            r.clone_with_distribution(NodeId(1), comb),
            Err(ReactionError::IncompatibleCloneTarget { .. })
        ));
        let copy = r.clone_with_distribution(NodeId(1), exponential(3.0)).unwrap();
        assert!(copy.is_markovian());
        assert_eq!(copy.rate(), 3.0);
    }

    #[test]
    fn clone_is_independent() {
        let knob = Knob::new(1.0);
        let rng = SharedRng::seeded(17);
        let exp = ExponentialTime::new(1.0, Time::ZERO, rng).unwrap().into();
        let mut original = PropensityGated::new(NODE, exp, conds(&[&knob]));
        original.initialization_complete(Time::ZERO).unwrap();

        let mut copy = original.clone_on_new_node(NodeId(2), Time::ZERO).unwrap();
        assert_eq!(copy.node(), NodeId(2));
        assert!(copy.tau().is_err());
        copy.initialization_complete(Time::ZERO).unwrap();
        let copy_tau = copy.tau().unwrap();

        knob.0.set(4.0);
        original.update(Time::ZERO, false).unwrap();
        original.update(Time::at(0.01), true).unwrap();
        assert_eq!(original.rate(), 4.0);

        // The copy's condition was cloned, so it still reads 1.0.
        assert_eq!(copy.update(Time::ZERO, false).unwrap(), Transition::Scheduled(copy_tau));
        assert_eq!(copy.rate(), 1.0);
    }

    proptest! {
        #[test]
        fn tau_never_precedes_now(
            a    in 0.01f64..100.0,
            b    in 0.01f64..100.0,
            seed in any::<u64>(),
            now  in 0.0f64..1e4,
        ) {
            let (ka, kb) = (Knob::new(a), Knob::new(b));
            let exp = ExponentialTime::new(1.0, Time::ZERO, SharedRng::seeded(seed)).unwrap().into();
            let mut r = PropensityGated::new(NODE, exp, conds(&[&ka, &kb]));
            r.initialization_complete(Time::at(now)).unwrap();
            prop_assert!(r.tau().unwrap() >= Time::at(now));

            ka.0.set(b);
            r.update(Time::at(now), false).unwrap();
            prop_assert!(r.tau().unwrap() >= Time::at(now));
        }
    }
}

#[cfg(test)]
mod event {
    use tau_core::{NodeId, SimConfig, Time};
    use tau_distribution::{DiracComb, DistributionConfig, ExponentialTime, Transition, Trigger};

    use super::support::{Knob, conds, half};
    use crate::{Event, ReactionError};

    const NODE: NodeId = NodeId(1);

    #[test]
    fn tau_before_initialization_fails() {
        let mut e = Event::new(NODE, Trigger::new(Time::at(1.0)).into(), vec![]);
        assert!(matches!(e.tau(), Err(ReactionError::UninitializedAccess { node: NODE })));
        assert!(e.update(Time::ZERO, false).is_err());
        e.initialization_complete(Time::ZERO).unwrap();
        assert_eq!(e.tau().unwrap(), Time::at(1.0));
    }

    #[test]
    fn conditions_do_not_gate() {
        let blocked = Knob::new(0.0);
        let comb = DiracComb::new(Time::ZERO, 2.0).unwrap().into();
        let mut e = Event::new(NODE, comb, conds(&[&blocked]));
        assert_eq!(e.initialization_complete(Time::ZERO).unwrap(), Transition::Scheduled(Time::ZERO));
        assert_eq!(e.update(Time::ZERO, true).unwrap(), Transition::Scheduled(Time::at(0.5)));
        assert_eq!(e.rate(), 2.0);
    }

    #[test]
    fn executed_with_no_future_is_exhausted() {
        let mut e = Event::new(NODE, Trigger::new(Time::at(1.0)).into(), vec![]);
        e.initialization_complete(Time::ZERO).unwrap();
        assert_eq!(e.update(Time::at(1.0), true).unwrap(), Transition::Exhausted);
        assert_eq!(e.tau().unwrap(), Time::INFINITE);
    }

    #[test]
    fn disabled_is_only_exhausted_once_executed() {
        let exp = ExponentialTime::new(0.0, Time::ZERO, half()).unwrap().into();
        let mut e = Event::new(NODE, exp, vec![]);
        assert_eq!(e.initialization_complete(Time::ZERO).unwrap(), Transition::Disabled);
        assert_eq!(e.update(Time::at(1.0), false).unwrap(), Transition::Disabled);
        assert_eq!(e.update(Time::at(1.0), true).unwrap(), Transition::Exhausted);
    }

    #[test]
    fn built_from_run_config() {
        let config = SimConfig::new(42, Time::at(1.0));
        config.validate().unwrap();
        let rng = config.make_rng();
        let d = DistributionConfig::Exponential { rate: 1.0 }.build(config.start_time, &rng).unwrap();
        let mut e = Event::new(NODE, d, vec![]);
        e.initialization_complete(Time::ZERO).unwrap();
        assert!(e.tau().unwrap() >= config.start_time);
    }

    #[test]
    fn clone_moves_to_new_node() {
        let knob = Knob::new(1.0);
        let comb = DiracComb::new(Time::at(1.0), 1.0).unwrap().into();
        let e = Event::new(NODE, comb, conds(&[&knob]));
        let copy = e.clone_on_new_node(NodeId(9), Time::at(2.0)).unwrap();
        assert_eq!(copy.node(), NodeId(9));
        assert_eq!(copy.conditions().len(), 1);
        assert!(!copy.is_initialized());
    }
}

#[cfg(test)]
mod node {
    use tau_core::{NodeId, ReactionId, Time};
    use tau_distribution::{DiracComb, Transition, Trigger};

    use crate::{Event, Node, PropensityGated, Reaction, ReactionError};

    const HOST: NodeId = NodeId(1);

    fn trigger_at(t: f64) -> Reaction {
        PropensityGated::new(HOST, Trigger::new(Time::at(t)).into(), vec![]).into()
    }

    fn comb(rate: f64) -> Reaction {
        Event::new(HOST, DiracComb::new(Time::ZERO, rate).unwrap().into(), vec![]).into()
    }

    #[test]
    fn ids_are_sequential_and_not_reused() {
        let mut node = Node::new(HOST);
        let a = node.add_reaction(comb(1.0));
        let b = node.add_reaction(comb(2.0));
        assert_eq!((a, b), (ReactionId(0), ReactionId(1)));
        node.remove_reaction(a).unwrap();
        assert_eq!(node.add_reaction(comb(3.0)), ReactionId(2));
        assert_eq!(node.len(), 2);
    }

    #[test]
    fn trigger_is_removed_after_firing() {
        let mut node = Node::new(HOST);
        let id = node.add_reaction(trigger_at(1.0));
        assert!(node.initialize(Time::ZERO).unwrap().is_empty());
        assert_eq!(node.get(id).unwrap().tau().unwrap(), Time::at(1.0));

        assert_eq!(node.update_reaction(id, Time::at(1.0), true).unwrap(), Transition::Exhausted);
        assert!(!node.contains(id));
        assert!(node.is_empty());
        assert!(matches!(
            node.update_reaction(id, Time::at(2.0), false),
            Err(ReactionError::ReactionNotFound(missing)) if missing == id
        ));
    }

    #[test]
    fn initialize_drops_spent_reactions() {
        let mut node = Node::new(HOST);
        let live = node.add_reaction(comb(1.0));
        let spent = node.add_reaction(
            PropensityGated::new(HOST, Trigger::new(Time::INFINITE).into(), vec![]).into(),
        );
        assert_eq!(node.initialize(Time::ZERO).unwrap(), vec![spent]);
        assert!(node.contains(live));
    }

    #[test]
    fn remove_missing_reaction() {
        let mut node = Node::new(HOST);
        assert!(matches!(
            node.remove_reaction(ReactionId(3)),
            Err(ReactionError::ReactionNotFound(ReactionId(3)))
        ));
    }

    #[test]
    fn clone_onto_keeps_ids_and_variants() {
        let mut node = Node::new(HOST);
        let a = node.add_reaction(comb(2.0));
        let b = node.add_reaction(trigger_at(5.0));
        node.initialize(Time::ZERO).unwrap();

        let mut copy = node.clone_onto(NodeId(7), Time::at(1.0)).unwrap();
        assert_eq!(copy.id(), NodeId(7));
        assert_eq!(copy.get(a).unwrap().kind(), "Event");
        assert_eq!(copy.get(b).unwrap().kind(), "PropensityGated");
        assert!(copy.reactions().all(|(_, r)| r.node() == NodeId(7)));
        assert!(copy.get(a).unwrap().tau().is_err());

        copy.initialize(Time::at(1.0)).unwrap();
        assert_eq!(copy.get(a).unwrap().tau().unwrap(), Time::at(1.0));
        assert_eq!(copy.get(b).unwrap().tau().unwrap(), Time::at(5.0));
        assert_eq!(copy.add_reaction(comb(1.0).clone_on_new_node(NodeId(7), Time::ZERO).unwrap()), ReactionId(2));
    }

    #[test]
    fn display() {
        let r: Reaction = PropensityGated::new(NodeId(3), DiracComb::new(Time::ZERO, 2.0).unwrap().into(), vec![]).into();
        assert_eq!(r.to_string(), "PropensityGated[DiracComb(0.5)]@NodeId(3)");
    }
}
