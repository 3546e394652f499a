//! Role-based exhaustive search.
//!
//! One node (the master) sweeps every channel in the scenario one slot at a
//! time. Every other node (a slave) dwells on each of its own channels for
//! `N` slots before moving on, giving the faster master time to come by.
//!
//! The six variants share this state machine and differ only in the order in
//! which channels are visited, see [`OrderingPolicy`].

use rand::seq::SliceRandom;
use tracing::{debug, trace};

use super::Rendezvous;
use crate::{
    channel::{Channel, ChannelSet},
    env::Environment,
    error::RendezvousError,
};

/// Asymmetric role in exhaustive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Hops every slot across the whole population.
    Master,
    /// Dwells `N` slots on each of its own channels.
    Slave,
}

impl Role {
    /// Node 1 is the master, every other node a slave.
    pub fn for_node(node_id: u32) -> Self {
        if node_id == 1 { Self::Master } else { Self::Slave }
    }
}

/// Order in which a role visits its channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderingPolicy {
    /// Uniformly random permutation.
    Randomized,
    /// Ascending channel id.
    LowestIdFirst,
    /// Descending channel id.
    HighestIdFirst,
    /// Contiguous id runs, shortest run first.
    SmallestGapFirst,
    /// Contiguous id runs, longest run first.
    LargestGapFirst,
    /// Master visits even ids first, slaves odd ids first.
    EvenOddFirst,
}

impl OrderingPolicy {
    /// Every ordering policy.
    pub const ALL: [Self; 6] = [
        Self::Randomized,
        Self::LowestIdFirst,
        Self::HighestIdFirst,
        Self::SmallestGapFirst,
        Self::LargestGapFirst,
        Self::EvenOddFirst,
    ];

    /// Order `channels` for `role`.
    ///
    /// The result is always a permutation of `channels`.
    pub fn order<E: Environment>(
        self,
        channels: &[Channel],
        role: Role,
        env: &mut E,
    ) -> Vec<Channel> {
        let mut sorted = channels.to_vec();
        sorted.sort_unstable();

        match self {
            Self::Randomized => {
                let mut shuffled = channels.to_vec();
                shuffled.shuffle(env.rng());
                shuffled
            },
            Self::LowestIdFirst => sorted,
            Self::HighestIdFirst => {
                sorted.reverse();
                sorted
            },
            Self::SmallestGapFirst => {
                let mut runs = contiguous_runs(&sorted);
                runs.sort_by_key(Vec::len);
                runs.concat()
            },
            Self::LargestGapFirst => {
                let mut runs = contiguous_runs(&sorted);
                runs.sort_by_key(|run| std::cmp::Reverse(run.len()));
                runs.concat()
            },
            Self::EvenOddFirst => {
                let (even, odd): (Vec<Channel>, Vec<Channel>) =
                    sorted.into_iter().partition(|c| c.id() % 2 == 0);
                match role {
                    Role::Master => [even, odd].concat(),
                    Role::Slave => [odd, even].concat(),
                }
            },
        }
    }
}

/// Split ascending channels into runs of consecutive ids.
fn contiguous_runs(sorted: &[Channel]) -> Vec<Vec<Channel>> {
    let mut runs: Vec<Vec<Channel>> = Vec::new();
    for &channel in sorted {
        let successor = runs.last().and_then(|run| run.last()).and_then(|c| c.id().checked_add(1));
        match runs.last_mut() {
            Some(run) if successor == Some(channel.id()) => run.push(channel),
            _ => runs.push(vec![channel]),
        }
    }
    runs
}

/// Role-specific cursor state.
#[derive(Debug, Clone)]
enum Hopping {
    /// Advances every slot.
    Master { sequence: Vec<Channel>, cursor: usize },
    /// Advances once every `dwell` slots.
    Slave { sequence: Vec<Channel>, cursor: usize, dwell: u64 },
}

/// Master/slave exhaustive search parameterized by an ordering policy.
#[derive(Debug, Clone)]
pub struct ExhaustiveSearch {
    policy: OrderingPolicy,
    /// Channels this node may emit: the population for the master, the
    /// node's own set for a slave.
    visible: ChannelSet,
    hopping: Hopping,
    slot: u64,
}

impl ExhaustiveSearch {
    /// Build the state machine for `role`.
    ///
    /// The master orders `population`, a slave orders `own`.
    ///
    /// # Errors
    ///
    /// Returns `NoChannels` if `own` is empty, or `ChannelNotInPopulation` if
    /// the master owns a channel that `population` lacks.
    pub fn new<E: Environment>(
        policy: OrderingPolicy,
        role: Role,
        own: &ChannelSet,
        population: &ChannelSet,
        env: &mut E,
    ) -> Result<Self, RendezvousError> {
        if own.is_empty() {
            return Err(RendezvousError::NoChannels);
        }

        let (visible, hopping) = match role {
            Role::Master => {
                if let Some(channel) = own.iter().find(|&c| !population.contains(c)) {
                    return Err(RendezvousError::ChannelNotInPopulation { channel });
                }
                let sequence = policy.order(population.as_slice(), role, env);
                (population.clone(), Hopping::Master { sequence, cursor: 0 })
            },
            Role::Slave => {
                let sequence = policy.order(own.as_slice(), role, env);
                let dwell = own.len() as u64;
                (own.clone(), Hopping::Slave { sequence, cursor: 0, dwell })
            },
        };

        debug!(?policy, ?role, channels = visible.len(), "exhaustive search initialized");

        Ok(Self { policy, visible, hopping, slot: 0 })
    }

    /// Ordering policy in use.
    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Role fixed at construction.
    pub fn role(&self) -> Role {
        match self.hopping {
            Hopping::Master { .. } => Role::Master,
            Hopping::Slave { .. } => Role::Slave,
        }
    }

    /// Hopping sequence this node cycles through.
    pub fn sequence(&self) -> &[Channel] {
        match &self.hopping {
            Hopping::Master { sequence, .. } | Hopping::Slave { sequence, .. } => sequence,
        }
    }
}

impl Rendezvous for ExhaustiveSearch {
    fn name(&self) -> &'static str {
        match self.policy {
            OrderingPolicy::Randomized => "ExhaustiveSearch",
            OrderingPolicy::LowestIdFirst => "ExhaustiveSearchLowestId",
            OrderingPolicy::HighestIdFirst => "ExhaustiveSearchHighestId",
            OrderingPolicy::SmallestGapFirst => "ExhaustiveSearchSmallestGap",
            OrderingPolicy::LargestGapFirst => "ExhaustiveSearchLargestGap",
            OrderingPolicy::EvenOddFirst => "ExhaustiveSearchEvenOdd",
        }
    }

    fn next_channel(&mut self) -> Channel {
        self.slot += 1;
        let channel = match &mut self.hopping {
            Hopping::Master { sequence, cursor } => {
                let channel = sequence[*cursor];
                *cursor = (*cursor + 1) % sequence.len();
                channel
            },
            Hopping::Slave { sequence, cursor, dwell } => {
                let channel = sequence[*cursor];
                if self.slot % *dwell == 0 {
                    *cursor = (*cursor + 1) % sequence.len();
                }
                channel
            },
        };
        trace!(slot = self.slot, %channel, "exhaustive search step");
        channel
    }

    fn channels(&self) -> &ChannelSet {
        &self.visible
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::env::testing::TestEnv;

    fn channels(ids: &[u32]) -> Vec<Channel> {
        ids.iter().copied().map(Channel::new).collect()
    }

    fn ids(channels: &[Channel]) -> Vec<u32> {
        channels.iter().map(|c| c.id()).collect()
    }

    fn order(policy: OrderingPolicy, input: &[u32], role: Role) -> Vec<u32> {
        ids(&policy.order(&channels(input), role, &mut TestEnv::with_seed(0)))
    }

    #[test]
    fn role_from_node_id() {
        assert_eq!(Role::for_node(1), Role::Master);
        assert_eq!(Role::for_node(0), Role::Slave);
        assert_eq!(Role::for_node(2), Role::Slave);
    }

    #[test]
    fn id_orderings() {
        let input = [5, 1, 9, 3];
        assert_eq!(order(OrderingPolicy::LowestIdFirst, &input, Role::Master), vec![1, 3, 5, 9]);
        assert_eq!(order(OrderingPolicy::HighestIdFirst, &input, Role::Slave), vec![9, 5, 3, 1]);
    }

    #[test]
    fn gap_orderings() {
        // Runs: [1,2,3] [5] [7,8] [10]
        let input = [8, 1, 10, 3, 5, 2, 7];
        assert_eq!(
            order(OrderingPolicy::SmallestGapFirst, &input, Role::Master),
            vec![5, 10, 7, 8, 1, 2, 3]
        );
        assert_eq!(
            order(OrderingPolicy::LargestGapFirst, &input, Role::Master),
            vec![1, 2, 3, 7, 8, 5, 10]
        );
    }

    #[test]
    fn even_odd_depends_on_role() {
        let input = [4, 3, 1, 2, 0];
        assert_eq!(order(OrderingPolicy::EvenOddFirst, &input, Role::Master), vec![0, 2, 4, 1, 3]);
        assert_eq!(order(OrderingPolicy::EvenOddFirst, &input, Role::Slave), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn master_sweeps_population_every_slot() {
        let own = ChannelSet::from_ids([2, 4]).expect("unique ids");
        let population = ChannelSet::from_ids([2, 4, 6, 8, 9]).expect("unique ids");
        let mut master = ExhaustiveSearch::new(
            OrderingPolicy::LowestIdFirst,
            Role::Master,
            &own,
            &population,
            &mut TestEnv::with_seed(0),
        )
        .expect("build");

        // Slot 1 emits the head of the ordering, then the cursor moves on.
        assert_eq!(master.sequence()[0], Channel::new(2));
        let emitted: Vec<u32> = (0..7).map(|_| master.next_channel().id()).collect();
        assert_eq!(emitted, vec![2, 4, 6, 8, 9, 2, 4]);
        assert_eq!(master.channels(), &population);
    }

    #[test]
    fn slave_dwells_for_own_channel_count() {
        let own = ChannelSet::from_ids([6, 3, 1]).expect("unique ids");
        let population = ChannelSet::from_ids([0, 1, 3, 6]).expect("unique ids");
        let mut slave = ExhaustiveSearch::new(
            OrderingPolicy::LowestIdFirst,
            Role::Slave,
            &own,
            &population,
            &mut TestEnv::with_seed(0),
        )
        .expect("build");

        let emitted: Vec<u32> = (0..10).map(|_| slave.next_channel().id()).collect();
        assert_eq!(emitted, vec![1, 1, 1, 3, 3, 3, 6, 6, 6, 1]);
        assert_eq!(slave.channels(), &own);
    }

    #[test]
    fn master_rejects_channel_outside_population() {
        let own = ChannelSet::from_ids([1, 42]).expect("unique ids");
        let population = ChannelSet::from_ids([1, 2]).expect("unique ids");
        let err = ExhaustiveSearch::new(
            OrderingPolicy::Randomized,
            Role::Master,
            &own,
            &population,
            &mut TestEnv::with_seed(0),
        )
        .unwrap_err();
        assert_eq!(err, RendezvousError::ChannelNotInPopulation { channel: Channel::new(42) });
    }

    fn id_set() -> impl Strategy<Value = Vec<u32>> {
        proptest::collection::btree_set(0u32..64, 1..24).prop_map(|s| s.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_orderings_are_permutations(input in id_set(), seed in any::<u64>()) {
            let channels = channels(&input);
            for policy in OrderingPolicy::ALL {
                for role in [Role::Master, Role::Slave] {
                    let mut ordered = policy.order(&channels, role, &mut TestEnv::with_seed(seed));
                    ordered.sort_unstable();
                    prop_assert_eq!(ids(&ordered), input.clone());
                }
            }
        }

        #[test]
        fn prop_slave_changes_at_most_once_per_dwell(input in id_set(), seed in any::<u64>()) {
            let own = ChannelSet::from_ids(input.iter().copied()).expect("unique ids");
            let n = own.len();
            for policy in OrderingPolicy::ALL {
                let mut slave = ExhaustiveSearch::new(
                    policy,
                    Role::Slave,
                    &own,
                    &own,
                    &mut TestEnv::with_seed(seed),
                )
                .expect("build");
                prop_assert_eq!(slave.sequence().len(), n);

                let emitted: Vec<Channel> = (0..4 * n).map(|_| slave.next_channel()).collect();
                for (k, channel) in emitted.iter().enumerate() {
                    prop_assert_eq!(*channel, emitted[k - k % n]);
                }
            }
        }

        #[test]
        fn prop_master_orders_whole_population(input in id_set(), seed in any::<u64>()) {
            let population = ChannelSet::from_ids(input.iter().copied()).expect("unique ids");
            let own = ChannelSet::from_ids(input.iter().copied().take(1)).expect("unique ids");
            for policy in OrderingPolicy::ALL {
                let master = ExhaustiveSearch::new(
                    policy,
                    Role::Master,
                    &own,
                    &population,
                    &mut TestEnv::with_seed(seed),
                )
                .expect("build");
                let mut sequence = master.sequence().to_vec();
                sequence.sort_unstable();
                prop_assert_eq!(ids(&sequence), input.clone());
            }
        }
    }
}
