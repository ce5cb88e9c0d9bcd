use bitbloom::BloomFilter;

/// Generate a test asserting the result of a sequence of `put_str` / `test_str`
/// calls against a 1024 bit filter using the default hash functions.
///
/// The expected values are pinned: a change in the hash functions or the
/// bit addressing changes them.
macro_rules! test_pinned_fixture {
    (
		$name:ident;                        // Test name suffix.
		$(put $insert:expr;)*              // Values inserted before testing.
		$(test $probe:expr => $want:expr;)+ // Expected lookup results.
	) => {
        paste::paste! {
            #[test]
            fn [<test_pinned_fixture_ $name>]() {
                let mut b = BloomFilter::new_default(1024).expect("must allocate");

                $(b.put_str($insert);)*

                $(
                    assert_eq!(
                        b.test_str($probe),
                        $want,
                        "unexpected test_str({:?})",
                        $probe
                    );
                )+
            }
        }
    };
}

test_pinned_fixture!(empty;
    test "abc" => false;
    test "" => false;
);

test_pinned_fixture!(abc;
    put "abc";
    test "abc" => true;
    test "bcd" => false;
    test "0" => false;
    test "1" => false;
);

test_pinned_fixture!(abc_then_2;
    put "abc";
    put "2";
    test "abc" => true;
    test "2" => true;
    test "bcd" => false;
    test "0" => false;
    test "1" => false;
);

test_pinned_fixture!(empty_string;
    put "";
    test "" => true;
    test "abc" => false;
);

#[test]
fn test_pinned_item_count() {
    let mut b = BloomFilter::new_default(1024).expect("must allocate");
    b.put_str("abc");
    b.put_str("2");

    assert_eq!(b.item_count(), 4);
    assert_eq!(b.load(), 4.0 / 1024.0);
}
